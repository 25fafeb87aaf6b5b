//! Error types for ripple operations.
//!
//! This module provides the error hierarchy for the mastery engine, with
//! structured error codes so callers can map failures to HTTP statuses.

use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for ripple operations.
pub type RippleResult<T> = Result<T, RippleError>;

/// Main error type for all ripple operations.
#[derive(Error, Debug)]
pub enum RippleError {
    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
    },

    /// Card not found.
    #[error("Card not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        card_id: Option<u64>,
    },

    /// No cards available for selection.
    #[error("No cards in the deck")]
    EmptyStore,

    /// Embedding generation failed.
    #[error("Embedding error: {message}")]
    Embedding {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider not supported.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValMissingField,

    // Card (CARD_xxx)
    CardNotFound,
    CardStoreEmpty,

    // Embedding (EMB_xxx)
    EmbConnectionFailed,
    EmbGenerationFailed,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValMissingField => "VAL_002",
            ErrorCode::CardNotFound => "CARD_001",
            ErrorCode::CardStoreEmpty => "CARD_002",
            ErrorCode::EmbConnectionFailed => "EMB_001",
            ErrorCode::EmbGenerationFailed => "EMB_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl RippleError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
        }
    }

    /// Create a validation error with per-field details.
    pub fn validation_with_details(
        message: impl Into<String>,
        details: HashMap<String, String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details,
        }
    }

    /// Create a not found error for a card id.
    pub fn card_not_found(card_id: u64) -> Self {
        Self::NotFound {
            message: format!("Card with id {} not found", card_id),
            code: ErrorCode::CardNotFound,
            card_id: Some(card_id),
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbGenerationFailed,
            source: None,
        }
    }

    /// Create an embedding error wrapping a provider error.
    pub fn embedding_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Embedding {
            message: message.into(),
            code: ErrorCode::EmbGenerationFailed,
            source: Some(source),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::EmptyStore => ErrorCode::CardStoreEmpty,
            Self::Embedding { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = RippleError::validation("front must not be empty");
        assert_eq!(err.code(), ErrorCode::ValInvalidInput);
        assert!(err.to_string().contains("front must not be empty"));
    }

    #[test]
    fn test_card_not_found_error() {
        let err = RippleError::card_not_found(42);
        assert_eq!(err.code(), ErrorCode::CardNotFound);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_empty_store_code() {
        assert_eq!(RippleError::EmptyStore.code(), ErrorCode::CardStoreEmpty);
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::ValInvalidInput.as_str(), "VAL_001");
        assert_eq!(ErrorCode::CardNotFound.as_str(), "CARD_001");
    }
}
