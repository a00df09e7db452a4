use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            TraceLayer::new_for_http().make_span_with(make_span_with_request_id),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Browsing
        .route("/browse", get(handlers::browse_catalog))
        .route("/facets", get(handlers::get_facets))
        .route("/history", get(handlers::get_history))
        // Watchlist
        .route("/watchlist", get(handlers::get_watchlist))
        .route("/watchlist/toggle", post(handlers::toggle_watchlist))
        // Ratings
        .route("/ratings", post(handlers::rate_item))
        .route("/profile", get(handlers::get_profile))
}
