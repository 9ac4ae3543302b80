use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::core::swipes::{record_swipe, swipe_stats};
use crate::models::{ApiError, ApiResponse, SwipeAction, SwipeRequest};
use crate::routes::{authed_user_id, AppState};

/// Configure swipe recording routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/swipes")
            .route("", web::post().to(record))
            .route("/stats", web::get().to(stats)),
    );
}

/// Record a swipe decision
///
/// POST /api/swipes {restaurantId, action}
///
/// Appends to the swipe history unconditionally with a server-side
/// timestamp; a like also adds the restaurant to the liked set if it is
/// not already there. Responds with the appended entry.
async fn record(
    state: web::Data<AppState>,
    session: Session,
    payload: web::Json<SwipeRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let req = payload.into_inner();

    let (Some(restaurant_id), Some(action_raw)) = (req.restaurant_id, req.action) else {
        return Err(ApiError::validation(
            "Missing required fields: restaurantId, action",
        ));
    };

    let action = SwipeAction::parse(&action_raw).ok_or_else(|| {
        ApiError::validation("Action must be either \"like\" or \"dislike\"")
    })?;

    let mut user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let entry = record_swipe(&mut user, &restaurant_id, action, Utc::now());
    state.store.save_user(&user).await?;

    tracing::debug!("Recorded {:?} on {} for user {}", action, restaurant_id, user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(entry, "Swipe recorded successfully")))
}

/// Swipe statistics for the current user
///
/// GET /api/swipes/stats
async fn stats(state: web::Data<AppState>, session: Session) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;

    let user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(swipe_stats(&user.swipe_history))))
}
