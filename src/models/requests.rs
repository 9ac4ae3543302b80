use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DietaryTag, PriceTier, UserPreferences};

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request to log in with an existing account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to record a swipe decision.
///
/// Both fields are optional at the type level so a missing field surfaces
/// as the documented 400 rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

/// Partial replacement of the stored preference configuration. Only the
/// fields present in the payload overwrite stored values; unrecognized
/// fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub budget: Option<PriceTier>,
    #[serde(default)]
    pub max_distance: Option<f64>,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<DietaryTag>>,
    #[serde(default)]
    pub cuisine_preferences: Option<Vec<String>>,
}

impl PreferencesUpdate {
    /// Overwrite the fields that are present, leave the rest untouched.
    pub fn apply_to(self, prefs: &mut UserPreferences) {
        if let Some(budget) = self.budget {
            prefs.budget = budget;
        }
        if let Some(max_distance) = self.max_distance {
            prefs.max_distance = max_distance;
        }
        if let Some(dietary) = self.dietary_restrictions {
            prefs.dietary_restrictions = dietary;
        }
        if let Some(cuisines) = self.cuisine_preferences {
            prefs.cuisine_preferences = cuisines;
        }
    }
}

/// Query parameters accepted by the restaurant listing endpoint.
///
/// `dietary` and `excludeSwipedIds` arrive as comma-joined strings; the
/// translator in `core::query` splits and validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub max_distance: Option<f64>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub exclude_swiped_ids: Option<String>,
}
