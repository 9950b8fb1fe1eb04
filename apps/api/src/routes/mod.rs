pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/normalize", post(handlers::handle_normalize))
        .route(
            "/api/v1/lexicon/stats",
            get(handlers::handle_lexicon_stats),
        )
        .with_state(state)
}
