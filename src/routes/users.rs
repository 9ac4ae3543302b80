use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::swipes::clear_liked_history;
use crate::models::{
    ApiError, ApiResponse, AuthUser, LoginRequest, PreferencesUpdate, RegisterRequest, User,
};
use crate::routes::{authed_user_id, AppState, SESSION_USER_KEY};
use crate::services::StoreError;

/// Configure account and profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(current_user))
            .route("/preferences", web::get().to(get_preferences))
            .route("/preferences", web::put().to(update_preferences))
            .route("/liked", web::get().to(liked_restaurants))
            .route("/liked", web::delete().to(clear_liked))
            .route("/swipe-history", web::get().to(swipe_history)),
    );
}

/// Register a new account and establish a session
///
/// POST /api/users/register {email, password}
async fn register(
    state: web::Data<AppState>,
    session: Session,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    req.validate()
        .map_err(|errors| ApiError::Validation(errors.to_string()))?;

    let email = req.email.trim().to_lowercase();

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::validation("User already exists"));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
    let user = User::new(
        Uuid::new_v4().to_string(),
        email,
        password_hash,
        Utc::now(),
    );

    match state.store.insert_user(&user).await {
        Ok(()) => {}
        // Lost a registration race on the unique email index.
        Err(StoreError::DuplicateEmail) => {
            return Err(ApiError::validation("User already exists"));
        }
        Err(err) => return Err(err.into()),
    }

    session.insert(SESSION_USER_KEY, &user.id)?;

    tracing::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().json(ApiResponse::ok(AuthUser {
        id: user.id,
        email: user.email,
    })))
}

/// Log in with email and password
///
/// POST /api/users/login {email, password}
///
/// Unknown email and wrong password both answer with the same generic
/// message so the response does not leak which field was wrong.
async fn login(
    state: web::Data<AppState>,
    session: Session,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    let email = req.email.trim().to_lowercase();

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !bcrypt::verify(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    session.insert(SESSION_USER_KEY, &user.id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthUser {
        id: user.id,
        email: user.email,
    })))
}

/// Destroy the current session
///
/// POST /api/users/logout
async fn logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(ApiResponse::message("Logged out successfully"))
}

/// Current session's user, credential excluded
///
/// GET /api/users/me
async fn current_user(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, ApiError> {
    let user_id = session
        .get::<String>(SESSION_USER_KEY)?
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let user = load_user(&state, &user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// GET /api/users/preferences
async fn get_preferences(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let user = load_user(&state, &user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user.preferences)))
}

/// Replace the stored preference configuration
///
/// PUT /api/users/preferences
///
/// Partial payloads overwrite only the fields they carry; unrecognized
/// fields are ignored. Returns the updated configuration.
async fn update_preferences(
    state: web::Data<AppState>,
    session: Session,
    payload: web::Json<PreferencesUpdate>,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let update = payload.into_inner();

    if let Some(max_distance) = update.max_distance {
        if !(1.0..=25.0).contains(&max_distance) {
            return Err(ApiError::validation("maxDistance must be between 1 and 25"));
        }
    }

    let mut user = load_user(&state, &user_id).await?;
    update.apply_to(&mut user.preferences);
    state.store.save_user(&user).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user.preferences)))
}

/// Liked restaurants resolved into full records, in insertion order
///
/// GET /api/users/liked
async fn liked_restaurants(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let user = load_user(&state, &user_id).await?;

    let restaurants = state
        .store
        .restaurants_by_ids(&user.liked_restaurants)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(restaurants)))
}

/// Clear the liked history: empties the liked set and removes all "like"
/// entries from the swipe history, keeping dislikes
///
/// DELETE /api/users/liked
async fn clear_liked(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let mut user = load_user(&state, &user_id).await?;

    clear_liked_history(&mut user);
    state.store.save_user(&user).await?;

    tracing::info!("Cleared liked history for user {}", user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::message("Like history cleared successfully")))
}

/// Raw swipe history array
///
/// GET /api/users/swipe-history
async fn swipe_history(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, ApiError> {
    let user_id = authed_user_id(&session)?;
    let user = load_user(&state, &user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user.swipe_history)))
}

async fn load_user(state: &web::Data<AppState>, user_id: &str) -> Result<User, ApiError> {
    state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}
