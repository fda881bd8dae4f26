//! Error types for CiteScope
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - Machine-readable error codes
//! - A hard boundary between lookup misses, invalid input, and
//!   internal computation failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidFormat,
    InvalidRange,

    // Resource errors (4xxx)
    NotFound,
    PaperNotFound,
    AuthorNotFound,
    KeywordNotFound,

    // Store errors (7xxx)
    StoreError,

    // Computation errors (8xxx)
    ComputationError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidFormat => 1002,
            ErrorCode::InvalidRange => 1003,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::PaperNotFound => 4002,
            ErrorCode::AuthorNotFound => 4003,
            ErrorCode::KeywordNotFound => 4004,

            // Store (7xxx)
            ErrorCode::StoreError => 7001,

            // Computation (8xxx)
            ErrorCode::ComputationError => 8001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Invalid range: {message}")]
    InvalidRange { message: String },

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Paper not found: {id}")]
    PaperNotFound { id: String },

    #[error("Author not found: {name}")]
    AuthorNotFound { name: String },

    #[error("Keyword not found: {name}")]
    KeywordNotFound { name: String },

    // Store errors
    #[error("Store error: {message}")]
    Store { message: String },

    // Computation errors
    #[error("Computation failed in {stage}: {message}")]
    Computation { stage: String, message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::InvalidRange { .. } => ErrorCode::InvalidRange,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::PaperNotFound { .. } => ErrorCode::PaperNotFound,
            AppError::AuthorNotFound { .. } => ErrorCode::AuthorNotFound,
            AppError::KeywordNotFound { .. } => ErrorCode::KeywordNotFound,
            AppError::Store { .. } => ErrorCode::StoreError,
            AppError::Computation { .. } => ErrorCode::ComputationError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Construct a computation failure for a named pipeline stage
    pub fn computation(stage: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Computation {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Whether this error must resolve through the degraded-result path
    /// instead of surfacing to the caller
    pub fn is_computation_failure(&self) -> bool {
        matches!(self, AppError::Computation { .. })
    }

    /// Whether this error maps to a neutral (empty/zero/absent) result
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. }
                | AppError::PaperNotFound { .. }
                | AppError::AuthorNotFound { .. }
                | AppError::KeywordNotFound { .. }
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
