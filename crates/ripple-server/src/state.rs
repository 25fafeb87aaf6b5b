//! Server state management.

use std::sync::Arc;

use ripple_core::deck::Deck;

/// Shared application state.
///
/// The deck is constructed once at startup and injected here; handlers
/// reach it through this state rather than any process-wide static.
#[derive(Clone)]
pub struct AppState {
    pub deck: Arc<Deck>,
}

impl AppState {
    /// Create application state around a deck.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck: Arc::new(deck),
        }
    }
}
