//! ripple-server - REST API server for ripple.
//!
//! This crate exposes the deck over a small JSON surface.
//!
//! # Example
//!
//! ```ignore
//! use ripple_server::{create_deck, create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let deck = create_deck(DeckConfig::from_env().unwrap()).unwrap();
//!     let app = create_server(AppState::new(deck));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::create_deck;
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
