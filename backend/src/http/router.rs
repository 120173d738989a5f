//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/gyms", get(handlers::list_gyms))
        .route("/gyms/{gym}/records", post(handlers::import_records))
        .route(
            "/gyms/{gym}/orbits",
            get(handlers::get_orbits).put(handlers::put_orbits),
        )
        .route(
            "/gyms/{gym}/shifts",
            get(handlers::get_shifts).put(handlers::put_shifts),
        )
        .route("/gyms/{gym}/forecast", get(handlers::get_forecast))
        .route("/gyms/{gym}/outlook", get(handlers::get_outlook))
        .route("/staff", get(handlers::get_staff))
        .route(
            "/staff/{name}",
            put(handlers::put_staff_override).delete(handlers::clear_staff_override),
        )
        .route(
            "/settings/variance-buffer",
            get(handlers::get_variance_buffer).put(handlers::put_variance_buffer),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Record imports can span years of history.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
