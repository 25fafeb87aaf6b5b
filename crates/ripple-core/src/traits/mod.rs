//! Trait definitions for external capabilities.

mod embedder;

pub use embedder::{Embedder, EmbedderConfig, EmbedderProvider};
