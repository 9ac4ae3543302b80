// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DietaryTag, Location, PriceTier, Restaurant, SwipeAction, SwipeEntry, User, UserPreferences,
};
pub use requests::{ListFilters, LoginRequest, PreferencesUpdate, RegisterRequest, SwipeRequest};
pub use responses::{ApiError, ApiResponse, AuthUser};
