use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Creates all HTTP routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route(
            "/dns-query",
            get(handlers::dns_query_get).post(handlers::dns_query_post),
        )
        .route("/dns-providers", get(handlers::get_providers))
        .route("/health-scores", get(handlers::get_health_scores))
        .route("/analytics", get(handlers::get_analytics))
        .fallback(handlers::not_found)
        .with_state(state)
}
