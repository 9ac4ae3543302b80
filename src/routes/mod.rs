// Route exports
pub mod restaurants;
pub mod swipes;
pub mod users;

use actix_session::Session;
use actix_web::web;
use std::sync::Arc;

use crate::models::ApiError;
use crate::services::Store;

/// Session key holding the authenticated user's id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(restaurants::configure)
            .configure(users::configure)
            .configure(swipes::configure),
    );
}

/// Resolve the calling user's id from the session cookie, or fail with
/// the authentication error.
pub(crate) fn authed_user_id(session: &Session) -> Result<String, ApiError> {
    session
        .get::<String>(SESSION_USER_KEY)?
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}
