//! ripple-embeddings - Embedding provider implementations for ripple.
//!
//! This crate provides the text-to-vector capability the mastery engine
//! consumes through the `Embedder` trait.
//!
//! # Supported Providers
//!
//! - **OpenAI** (feature: `openai`) - text-embedding-3-small, text-embedding-3-large, etc.
//! - **Ollama** (feature: `ollama`) - Local embedding models via Ollama
//!
//! # Example
//!
//! ```ignore
//! use ripple_embeddings::EmbedderFactory;
//!
//! // Create an OpenAI embedder
//! let embedder = EmbedderFactory::openai()?;
//!
//! // Or a local Ollama embedder
//! let embedder = EmbedderFactory::ollama_with_model("nomic-embed-text", 768)?;
//! ```

mod factory;
mod ollama;
mod openai;

pub use factory::EmbedderFactory;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAIEmbedder;

// Re-export core types for convenience
pub use ripple_core::traits::{Embedder, EmbedderConfig, EmbedderProvider};
