//! Route definitions for the REST API.

mod cards;
mod health;
mod review;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Card operations
        .route("/api/cards", post(cards::add_cards))
        .route("/api/cards", get(cards::get_all_cards))
        .route("/api/cards/next", get(cards::get_next_card))
        // Review
        .route("/api/answer", post(review::submit_answer))
        // Attach state
        .with_state(state)
}

pub use cards::*;
pub use health::*;
pub use review::*;
