//! Configuration system for ripple.

use serde::{Deserialize, Serialize};

use crate::error::{RippleError, RippleResult};
use crate::traits::{EmbedderConfig, EmbedderProvider};

/// Embedder provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderProviderConfig {
    /// Provider type.
    pub provider: EmbedderProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: EmbedderConfig,
}

impl Default for EmbedderProviderConfig {
    fn default() -> Self {
        Self {
            provider: EmbedderProvider::OpenAI,
            config: EmbedderConfig::default(),
        }
    }
}

/// Main deck configuration.
///
/// All numeric parameters are configuration-with-defaults; the engine only
/// reads their values, it never branches on where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Prior pseudo-count of correct evidence for a new card.
    pub prior_alpha: f64,
    /// Prior pseudo-count of incorrect evidence for a new card.
    pub prior_beta: f64,
    /// Weight of the direct update on the reviewed card (one pseudo-observation).
    pub full_update_weight: f64,
    /// Similarity above which an answer propagates to a neighbor.
    pub similarity_threshold: f64,
    /// Scale applied to a neighbor's similarity to form its update weight.
    pub propagation_scale: f64,
    /// Selector weight on (1 - mastery).
    pub mastery_weight: f64,
    /// Selector weight on uncertainty.
    pub uncertainty_weight: f64,
    /// Embedder configuration.
    pub embedder: EmbedderProviderConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            prior_alpha: 1.0,
            prior_beta: 1.0,
            full_update_weight: 1.0,
            similarity_threshold: 0.4,
            propagation_scale: 0.5,
            mastery_weight: 0.5,
            uncertainty_weight: 0.5,
            embedder: EmbedderProviderConfig::default(),
        }
    }
}

impl DeckConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RippleResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RippleError::Configuration(e.to_string()))?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        let config: Self = match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| RippleError::Configuration(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| RippleError::Configuration(e.to_string()))?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| RippleError::Configuration(e.to_string()))?,
            _ => {
                return Err(RippleError::Configuration(
                    "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> RippleResult<Self> {
        let mut config = Self::default();

        read_f64("RIPPLE_PRIOR_ALPHA", &mut config.prior_alpha)?;
        read_f64("RIPPLE_PRIOR_BETA", &mut config.prior_beta)?;
        read_f64("RIPPLE_FULL_UPDATE_WEIGHT", &mut config.full_update_weight)?;
        read_f64(
            "RIPPLE_SIMILARITY_THRESHOLD",
            &mut config.similarity_threshold,
        )?;
        read_f64("RIPPLE_PROPAGATION_SCALE", &mut config.propagation_scale)?;
        read_f64("RIPPLE_MASTERY_WEIGHT", &mut config.mastery_weight)?;
        read_f64("RIPPLE_UNCERTAINTY_WEIGHT", &mut config.uncertainty_weight)?;

        if let Ok(provider) = std::env::var("RIPPLE_EMBEDDING_PROVIDER") {
            config.embedder.provider = match provider.to_lowercase().as_str() {
                "openai" => EmbedderProvider::OpenAI,
                "ollama" => EmbedderProvider::Ollama,
                other => {
                    return Err(RippleError::UnsupportedProvider {
                        provider: other.to_string(),
                    })
                }
            };
        }
        if let Ok(model) = std::env::var("RIPPLE_EMBEDDING_MODEL") {
            config.embedder.config.model = model;
        }
        if let Ok(dims) = std::env::var("RIPPLE_EMBEDDING_DIMS") {
            config.embedder.config.embedding_dims = dims
                .parse()
                .map_err(|_| RippleError::Configuration("RIPPLE_EMBEDDING_DIMS must be a positive integer".to_string()))?;
        }
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.embedder.config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("RIPPLE_EMBEDDING_BASE_URL") {
            config.embedder.config.base_url = Some(base_url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges.
    ///
    /// Priors and the direct-update weight must be strictly positive so the
    /// Beta parameters can never reach zero; the selector weights must be
    /// non-negative (a zero uncertainty weight degenerates to
    /// least-known-first, which is supported).
    pub fn validate(&self) -> RippleResult<()> {
        if self.prior_alpha <= 0.0 || self.prior_beta <= 0.0 {
            return Err(RippleError::Configuration(
                "prior_alpha and prior_beta must be positive".to_string(),
            ));
        }
        if self.full_update_weight <= 0.0 {
            return Err(RippleError::Configuration(
                "full_update_weight must be positive".to_string(),
            ));
        }
        if self.propagation_scale < 0.0 {
            return Err(RippleError::Configuration(
                "propagation_scale must be non-negative".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(RippleError::Configuration(
                "similarity_threshold must be within [-1, 1]".to_string(),
            ));
        }
        if self.mastery_weight < 0.0 || self.uncertainty_weight < 0.0 {
            return Err(RippleError::Configuration(
                "selector weights must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> DeckConfigBuilder {
        DeckConfigBuilder::default()
    }
}

fn read_f64(var: &str, target: &mut f64) -> RippleResult<()> {
    if let Ok(raw) = std::env::var(var) {
        *target = raw
            .parse()
            .map_err(|_| RippleError::Configuration(format!("{} must be a number", var)))?;
    }
    Ok(())
}

/// Builder for DeckConfig.
#[derive(Default)]
pub struct DeckConfigBuilder {
    config: DeckConfig,
}

impl DeckConfigBuilder {
    /// Set the Beta priors for new cards.
    pub fn priors(mut self, alpha: f64, beta: f64) -> Self {
        self.config.prior_alpha = alpha;
        self.config.prior_beta = beta;
        self
    }

    /// Set the direct update weight.
    pub fn full_update_weight(mut self, weight: f64) -> Self {
        self.config.full_update_weight = weight;
        self
    }

    /// Set the propagation similarity threshold.
    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the propagation scale.
    pub fn propagation_scale(mut self, scale: f64) -> Self {
        self.config.propagation_scale = scale;
        self
    }

    /// Set the selector weights.
    pub fn selector_weights(mut self, mastery: f64, uncertainty: f64) -> Self {
        self.config.mastery_weight = mastery;
        self.config.uncertainty_weight = uncertainty;
        self
    }

    /// Set embedder configuration.
    pub fn embedder(mut self, embedder: EmbedderProviderConfig) -> Self {
        self.config.embedder = embedder;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RippleResult<DeckConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
