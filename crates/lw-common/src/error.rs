//! Error types for the Logwarden baseline engine.
//!
//! Errors carry stable numeric codes for machine parsing and a category for
//! grouping. Only two situations produce errors at runtime:
//! - Configuration errors, surfaced at construction and never degraded silently
//! - Caller contract violations (colliding keys, wrong backend input shape)
//!
//! Querying an unknown event id is *not* an error; "no data yet" is an
//! expected steady state and query APIs return `None`/empty for it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Logwarden operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings and construction-time errors.
    Config,
    /// Ingestion contract violations.
    Ingest,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Ingest => write!(f, "ingest"),
        }
    }
}

/// Unified error type for Logwarden.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    // Ingestion errors (20-29)
    #[error("named variable {key:?} collides with a positional variable key")]
    KeyCollision { key: String },

    #[error("backend expects {expected} input, got {got}")]
    BackendMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Ingestion errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidValue { .. } => 11,
            Error::KeyCollision { .. } => 20,
            Error::BackendMismatch { .. } => 21,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidValue { .. } => ErrorCategory::Config,
            Error::KeyCollision { .. } | Error::BackendMismatch { .. } => ErrorCategory::Ingest,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Config errors: recoverable by fixing the settings
            Error::Config(_) | Error::InvalidValue { .. } => true,
            // Contract violations: the offending input must be dropped
            Error::KeyCollision { .. } => false,
            Error::BackendMismatch { .. } => false,
        }
    }
}
