//! Factory for creating Deck instances from configuration.

use std::sync::Arc;

use ripple_core::config::DeckConfig;
use ripple_core::deck::Deck;
use ripple_core::error::{RippleError, RippleResult};
use ripple_core::traits::{Embedder, EmbedderProvider};

use ripple_embeddings::{OllamaEmbedder, OpenAIEmbedder};

/// Create a Deck instance from configuration.
pub fn create_deck(config: DeckConfig) -> RippleResult<Deck> {
    let embedder = create_embedder(&config)?;
    Deck::new(config, embedder)
}

fn create_embedder(config: &DeckConfig) -> RippleResult<Arc<dyn Embedder>> {
    match config.embedder.provider {
        EmbedderProvider::OpenAI => {
            let embedder = OpenAIEmbedder::new(config.embedder.config.clone())?;
            Ok(Arc::new(embedder))
        }
        EmbedderProvider::Ollama => {
            let embedder = OllamaEmbedder::new(config.embedder.config.clone())?;
            Ok(Arc::new(embedder))
        }
        _ => Err(RippleError::Configuration(format!(
            "Unsupported embedder provider: {:?}",
            config.embedder.provider
        ))),
    }
}
