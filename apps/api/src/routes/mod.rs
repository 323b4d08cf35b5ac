pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use tower_http::trace::TraceLayer;

use crate::drafting::handlers;
use crate::page;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HTML page
        .route(
            "/",
            get(page::handlers::handle_index).post(page::handlers::handle_submit),
        )
        // Drafting API
        .route(
            "/api/v1/categories",
            get(handlers::handle_list_categories),
        )
        .route("/api/v1/drafts", post(handlers::handle_create_drafts))
        .with_state(state)
}

/// The router as served: routes plus HTTP tracing. Same-origin only, no CORS.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}
