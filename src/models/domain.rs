use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price tier for a restaurant, serialized as the dollar-sign symbols
/// the client renders ("$" through "$$$$").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Upscale => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "$" => Some(PriceTier::Budget),
            "$$" => Some(PriceTier::Moderate),
            "$$$" => Some(PriceTier::Upscale),
            "$$$$" => Some(PriceTier::Luxury),
            _ => None,
        }
    }
}

/// Dietary tags from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    Halal,
    Kosher,
}

impl DietaryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Vegan => "vegan",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::Halal => "halal",
            DietaryTag::Kosher => "kosher",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vegetarian" => Some(DietaryTag::Vegetarian),
            "vegan" => Some(DietaryTag::Vegan),
            "gluten-free" => Some(DietaryTag::GlutenFree),
            "halal" => Some(DietaryTag::Halal),
            "kosher" => Some(DietaryTag::Kosher),
            _ => None,
        }
    }
}

/// A single like/dislike decision on one restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

impl SwipeAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(SwipeAction::Like),
            "dislike" => Some(SwipeAction::Dislike),
            _ => None,
        }
    }
}

/// Geographic coordinate pair attached to a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Restaurant record. Immutable from the client's perspective; only
/// administrative seeding creates or updates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub price_range: PriceTier,
    pub distance: f64,
    pub cuisine_type: String,
    #[serde(default)]
    pub dietary_options: Vec<DietaryTag>,
    #[serde(default)]
    pub image_url: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_hours")]
    pub hours: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Location,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn default_hours() -> String {
    "9:00 AM - 9:00 PM".to_string()
}

/// One entry of a user's append-only swipe history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEntry {
    pub restaurant_id: String,
    pub action: SwipeAction,
    pub timestamp: DateTime<Utc>,
}

/// A user's stored preference configuration. Independently editable;
/// the client may seed listing filters from it but does not have to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default = "default_budget")]
    pub budget: PriceTier,
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryTag>,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
}

fn default_budget() -> PriceTier {
    PriceTier::Moderate
}

fn default_max_distance() -> f64 {
    5.0
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            max_distance: default_max_distance(),
            dietary_restrictions: Vec::new(),
            cuisine_preferences: Vec::new(),
        }
    }
}

/// User account record.
///
/// `liked_restaurants` holds unique ids in insertion order; every id in it
/// corresponds to an uncleared "like" entry in `swipe_history`. The
/// credential hash is never serialized outward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub preferences: UserPreferences,
    pub swipe_history: Vec<SwipeEntry>,
    pub liked_restaurants: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, email: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password_hash,
            preferences: UserPreferences::default(),
            swipe_history: Vec::new(),
            liked_restaurants: Vec::new(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tier_roundtrip() {
        assert_eq!(PriceTier::parse("$"), Some(PriceTier::Budget));
        assert_eq!(PriceTier::parse("$$$$"), Some(PriceTier::Luxury));
        assert_eq!(PriceTier::parse("$$$$$"), None);
        assert_eq!(PriceTier::Upscale.as_str(), "$$$");

        let json = serde_json::to_string(&PriceTier::Budget).unwrap();
        assert_eq!(json, "\"$\"");
    }

    #[test]
    fn test_dietary_tag_serialization() {
        let json = serde_json::to_string(&DietaryTag::GlutenFree).unwrap();
        assert_eq!(json, "\"gluten-free\"");
        assert_eq!(DietaryTag::parse("gluten-free"), Some(DietaryTag::GlutenFree));
        assert_eq!(DietaryTag::parse("paleo"), None);
    }

    #[test]
    fn test_swipe_action_parse() {
        assert_eq!(SwipeAction::parse("like"), Some(SwipeAction::Like));
        assert_eq!(SwipeAction::parse("dislike"), Some(SwipeAction::Dislike));
        assert_eq!(SwipeAction::parse("Like"), None);
        assert_eq!(SwipeAction::parse("superlike"), None);
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.budget, PriceTier::Moderate);
        assert_eq!(prefs.max_distance, 5.0);
        assert!(prefs.dietary_restrictions.is_empty());

        // An empty JSON object deserializes to the same defaults.
        let parsed: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, prefs);
    }

    #[test]
    fn test_user_serialization_excludes_credential() {
        let user = User::new(
            "u1".to_string(),
            "diner@example.com".to_string(),
            "$2b$12$secret".to_string(),
            chrono::Utc::now(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "diner@example.com");
    }
}
