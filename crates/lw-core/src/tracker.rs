//! Per-variable novelty tracking and classification.
//!
//! A [`VariableTracker`] records, for one variable of one event type, the set
//! of distinct values seen and a run-length-encoded history of "was this
//! value new" flags. Classification is a pure function of the current state,
//! recomputed on demand and never cached across mutation.

use lw_math::rle::RunLengthSequence;
use lw_math::stability::StabilityClassifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Verdict categories for a variable's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationKind {
    /// Too few samples to commit to a verdict.
    InsufficientData,
    /// Exactly one value ever observed.
    Static,
    /// Every observation introduced a new value.
    Random,
    /// Novelty rate decays across history segments.
    Stable,
    /// Novelty persists without converging.
    Unstable,
}

impl std::fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationKind::InsufficientData => write!(f, "insufficient_data"),
            ClassificationKind::Static => write!(f, "static"),
            ClassificationKind::Random => write!(f, "random"),
            ClassificationKind::Stable => write!(f, "stable"),
            ClassificationKind::Unstable => write!(f, "unstable"),
        }
    }
}

/// A verdict with its justification. Ephemeral: recomputed per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Verdict category.
    pub kind: ClassificationKind,
    /// Human-readable justification.
    pub reason: String,
}

impl Classification {
    fn new(kind: ClassificationKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Novelty state for a single variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableTracker {
    distinct_values: HashSet<String>,
    changes: RunLengthSequence<bool>,
    min_samples: usize,
    classifier: StabilityClassifier,
}

impl VariableTracker {
    /// Create a tracker with the given sample floor and stability classifier.
    pub fn new(min_samples: usize, classifier: StabilityClassifier) -> Self {
        Self {
            distinct_values: HashSet::new(),
            changes: RunLengthSequence::new(),
            min_samples,
            classifier,
        }
    }

    /// Record one observed value.
    ///
    /// A value is "new" iff inserting it grows the distinct set; the flag is
    /// appended to the change history, so `sample_count()` always equals the
    /// number of `add_value` calls.
    pub fn add_value(&mut self, value: &str) {
        let is_new = self.distinct_values.insert(value.to_string());
        self.changes.append(is_new);
    }

    /// Number of observations so far.
    pub fn sample_count(&self) -> usize {
        self.changes.len()
    }

    /// Number of distinct values seen so far.
    pub fn distinct_count(&self) -> usize {
        self.distinct_values.len()
    }

    /// Read-only view of the change history.
    pub fn changes(&self) -> &RunLengthSequence<bool> {
        &self.changes
    }

    /// Classify the variable's behavior from current state.
    ///
    /// Checks run strictly in order: the cheap exact-set tests come before
    /// the statistical segment test so degenerate series are never handed to
    /// the stability classifier.
    pub fn classify(&self) -> Classification {
        let samples = self.changes.len();
        let distinct = self.distinct_values.len();

        if samples < self.min_samples {
            return Classification::new(
                ClassificationKind::InsufficientData,
                format!("{} samples, need at least {}", samples, self.min_samples),
            );
        }
        if distinct == 1 {
            return Classification::new(
                ClassificationKind::Static,
                format!("single value across {} samples", samples),
            );
        }
        if distinct == samples {
            return Classification::new(
                ClassificationKind::Random,
                format!("every one of {} samples introduced a new value", samples),
            );
        }
        if self.classifier.is_stable(&self.changes) {
            return Classification::new(
                ClassificationKind::Stable,
                format!(
                    "novelty rate decays across {} segments ({} distinct over {} samples)",
                    self.classifier.segments(),
                    distinct,
                    samples
                ),
            );
        }
        Classification::new(
            ClassificationKind::Unstable,
            format!(
                "novelty rate stays above segment ceilings ({} distinct over {} samples)",
                distinct, samples
            ),
        )
    }
}
