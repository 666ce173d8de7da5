//! Serde-backed engine settings with YAML loading.

use crate::validate::{validate_settings, ValidationError, ValidationResult};
use lw_math::stability::{DEFAULT_SEGMENTS, DEFAULT_SEGMENT_THRESHOLDS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum change-history length before the classifier commits to a verdict.
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Chunk-list length that triggers compaction in the chunked backend.
pub const DEFAULT_COMPACT_EVERY: usize = 16;

/// Top-level settings for one baseline engine instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Event-store backend, fixed for the lifetime of the orchestrator.
    #[serde(default)]
    pub backend: BackendSettings,

    /// Stability classifier tuning (meaningful for the tracker backend).
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Variables excluded from ingestion.
    #[serde(default)]
    pub blacklist: BlacklistSettings,
}

impl EngineSettings {
    /// Parse settings from a YAML string and validate them.
    pub fn from_yaml_str(input: &str) -> ValidationResult<Self> {
        let settings: EngineSettings = serde_yaml::from_str(input)
            .map_err(|e| ValidationError::ParseError(e.to_string()))?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Load settings from a YAML file and validate them.
    pub fn from_yaml_file(path: &Path) -> ValidationResult<Self> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&input)
    }

    /// Validate the settings semantically.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_settings(self)
    }
}

/// Event-store backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendSettings {
    /// One growing table per event; unbounded, for externally-bounded volumes.
    FullFrame,

    /// Chunked append with bounded retention and periodic compaction.
    ChunkedFrame {
        /// Retention bound; `None` keeps everything.
        #[serde(default)]
        max_rows: Option<usize>,

        /// Merge the chunk list into one chunk once it grows past this.
        #[serde(default = "default_compact_every")]
        compact_every: usize,
    },

    /// Per-variable change trackers instead of raw rows.
    Tracker,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings::FullFrame
    }
}

fn default_compact_every() -> usize {
    DEFAULT_COMPACT_EVERY
}

/// Stability classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Verdicts below this many samples are `InsufficientData`.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Number of history segments.
    #[serde(default = "default_segments")]
    pub segments: usize,

    /// Per-segment change-rate ceilings, loosest to strictest.
    #[serde(default = "default_thresholds")]
    pub segment_thresholds: Vec<f64>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            min_samples: DEFAULT_MIN_SAMPLES,
            segments: DEFAULT_SEGMENTS,
            segment_thresholds: DEFAULT_SEGMENT_THRESHOLDS.to_vec(),
        }
    }
}

fn default_min_samples() -> usize {
    DEFAULT_MIN_SAMPLES
}

fn default_segments() -> usize {
    DEFAULT_SEGMENTS
}

fn default_thresholds() -> Vec<f64> {
    DEFAULT_SEGMENT_THRESHOLDS.to_vec()
}

/// Variables excluded from ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlacklistSettings {
    /// Named variables dropped by name.
    #[serde(default)]
    pub names: Vec<String>,

    /// Positional variables dropped by template slot index.
    #[serde(default)]
    pub positions: Vec<usize>,
}
