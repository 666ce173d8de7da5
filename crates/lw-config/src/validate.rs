//! Settings validation errors and semantic validation.

use crate::settings::{BackendSettings, EngineSettings};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
        }
    }
}

/// Validate engine settings semantically.
pub fn validate_settings(settings: &EngineSettings) -> ValidationResult<()> {
    validate_classifier(settings)?;
    validate_backend(&settings.backend)?;
    Ok(())
}

fn validate_classifier(settings: &EngineSettings) -> ValidationResult<()> {
    let classifier = &settings.classifier;

    if classifier.min_samples == 0 {
        return Err(ValidationError::InvalidValue {
            field: "classifier.min_samples".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if classifier.segments == 0 {
        return Err(ValidationError::InvalidValue {
            field: "classifier.segments".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if classifier.segments != classifier.segment_thresholds.len() {
        return Err(ValidationError::SemanticError(format!(
            "segment/threshold count mismatch: {} segments, {} thresholds",
            classifier.segments,
            classifier.segment_thresholds.len(),
        )));
    }

    for (index, &value) in classifier.segment_thresholds.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("classifier.segment_thresholds[{}]", index),
                message: format!("must be finite and positive, got {}", value),
            });
        }
    }

    if classifier
        .segment_thresholds
        .windows(2)
        .any(|pair| pair[1] >= pair[0])
    {
        return Err(ValidationError::SemanticError(format!(
            "segment thresholds must be strictly decreasing (loosest to strictest), got {:?}",
            classifier.segment_thresholds,
        )));
    }

    Ok(())
}

fn validate_backend(backend: &BackendSettings) -> ValidationResult<()> {
    if let BackendSettings::ChunkedFrame {
        max_rows,
        compact_every,
    } = backend
    {
        if *max_rows == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "backend.max_rows".to_string(),
                message: "must be at least 1 when set".to_string(),
            });
        }
        if *compact_every == 0 {
            return Err(ValidationError::InvalidValue {
                field: "backend.compact_every".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
    }
    Ok(())
}
