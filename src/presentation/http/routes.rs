//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let body = metrics::gather_metrics()
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user_routes())
        .nest("/category", category_routes())
        .nest("/thread", thread_routes())
        .nest("/post", post_routes())
}

/// Account routes (public)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::user::register))
        .route("/login", post(handlers::user::login))
}

/// Category routes (creation requires an administrator)
fn category_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::category::list_categories).post(handlers::category::create_category),
    )
}

/// Thread routes
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::thread::create_thread))
        .route("/{id}", get(handlers::thread::get_thread))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::post::create_post))
        .route("/{id}", get(handlers::post::get_post))
}
