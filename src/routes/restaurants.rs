use actix_web::{web, HttpResponse};

use crate::core::{build_query, trending_query};
use crate::models::{ApiError, ApiResponse, ListFilters};
use crate::routes::AppState;

/// Configure restaurant listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/restaurants")
            .route("", web::get().to(list_restaurants))
            .route("/explore/trending", web::get().to(trending))
            .route("/{id}", web::get().to(get_restaurant)),
    );
}

/// Filtered restaurant listing
///
/// GET /api/restaurants?budget=&maxDistance=&dietary=&cuisine=&excludeSwipedIds=
///
/// Each present filter is ANDed into the store query; absent filters are
/// omitted. Results are ordered by rating descending.
async fn list_restaurants(
    state: web::Data<AppState>,
    filters: web::Query<ListFilters>,
) -> Result<HttpResponse, ApiError> {
    let query = build_query(&filters).map_err(|err| ApiError::Validation(err.to_string()))?;

    tracing::debug!("Listing restaurants with {} filter clauses", query.clauses.len());

    let restaurants = state.store.list_restaurants(&query).await?;
    let count = restaurants.len();

    Ok(HttpResponse::Ok().json(ApiResponse::list(restaurants, count)))
}

/// Single restaurant lookup
///
/// GET /api/restaurants/{id}
async fn get_restaurant(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let restaurant = state
        .store
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(restaurant)))
}

/// Trending feed: top 10 by rating, ties broken by recency
///
/// GET /api/restaurants/explore/trending
async fn trending(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let restaurants = state.store.list_restaurants(&trending_query()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(restaurants)))
}
