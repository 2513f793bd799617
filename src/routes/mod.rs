pub mod avanues;
pub mod customers;
pub mod error;
pub mod relations;
pub mod shows;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(customers::routes())
        .merge(shows::routes())
        .merge(avanues::routes())
        .merge(relations::routes())
        // Health check
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
