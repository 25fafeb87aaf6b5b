//! ripple-core - Core library for ripple.
//!
//! This crate provides the mastery/selection engine behind ripple: each
//! card's recall belief is a Beta distribution, answers update the
//! reviewed card and propagate fractional updates to semantically similar
//! cards, and the selector prioritizes low mastery and high uncertainty.
//!
//! # Example
//!
//! ```ignore
//! use ripple_core::{Deck, DeckConfig, NewCard};
//!
//! let deck = Deck::new(DeckConfig::default(), embedder)?;
//!
//! // Add cards
//! deck.add_cards(vec![NewCard::new("What is 2+2?", "4")]).await?;
//!
//! // Review loop
//! let card = deck.next_card().await?;
//! deck.record_answer(card.id, true).await?;
//! ```

pub mod config;
pub mod deck;
pub mod error;
pub mod mastery;
pub mod selector;
pub mod similarity;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{DeckConfig, DeckConfigBuilder, EmbedderProviderConfig};
pub use deck::Deck;
pub use error::{ErrorCode, RippleError, RippleResult};
pub use mastery::MasteryEngine;
pub use selector::Selector;
pub use similarity::{cosine_similarity, SimilarityIndex};
pub use store::CardStore;
pub use traits::{Embedder, EmbedderConfig, EmbedderProvider};
pub use types::{AnswerOutcome, Card, CardSummary, NewCard};
