use actix_cors::Cors;
use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{time::Duration as CookieDuration, Key};
use actix_web::{error, middleware, web, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use swipebites::config::Settings;
use swipebites::models::{ApiError, ApiResponse};
use swipebites::routes::{self, AppState};
use swipebites::services::Store;

/// Handle JSON payload errors with the standard envelope
fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors with the standard envelope
fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::Validation(format!("Invalid query: {}", err)).into()
}

/// Service banner with the endpoint index
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SwipeBites API Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "restaurants": "/api/restaurants",
            "users": "/api/users",
            "swipes": "/api/swipes",
        }
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": "Route not found",
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let db_healthy = state.store.health_check().await.unwrap_or(false);
    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    })))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "full".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting SwipeBites API server...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Connect to PostgreSQL and run migrations
    let max_conn = settings.database.max_connections.unwrap_or(10);
    let min_conn = settings.database.min_connections.unwrap_or(1);

    let store = Arc::new(
        Store::connect(&settings.database.url, max_conn, min_conn)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                panic!("PostgreSQL connection error: {}", e);
            }),
    );

    info!("Record store initialized (max: {} connections)", max_conn);

    let app_state = AppState { store };

    // Session cookie signing key
    let session_key = Key::derive_from(settings.session.secret.as_bytes());
    let session_ttl = CookieDuration::seconds(settings.session.max_age_secs);
    let production = settings.server.production;
    let frontend_origin = settings.cors.frontend_origin.clone();

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        // Credentialed CORS pinned to the frontend origin in production,
        // permissive in development.
        let cors = if production {
            Cors::default()
                .allowed_origin(&frontend_origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            Cors::permissive()
        };

        let session = SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
            .cookie_secure(production)
            .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
            .build();

        actix_web::App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(session)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .configure(routes::configure_routes)
            .default_service(web::route().to(not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
