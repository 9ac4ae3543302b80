//! SwipeBites - restaurant discovery API
//!
//! Users swipe on restaurant cards filtered by budget, distance, cuisine,
//! and dietary tags; liked restaurants persist to a profile. The crate
//! exposes the pure domain logic (filter translation, swipe recording,
//! the client swipe session) as a library under the HTTP service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_query, trending_query, RestaurantQuery, SwipeSession};
pub use crate::core::{clear_liked_history, record_swipe, swipe_stats};
pub use crate::models::{Restaurant, SwipeAction, SwipeEntry, User, UserPreferences};
