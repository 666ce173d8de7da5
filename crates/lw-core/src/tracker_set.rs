//! Lazily-grown map of variable name to tracker, one set per event type.

use crate::tracker::{Classification, ClassificationKind, VariableTracker};
use lw_common::Record;
use lw_math::stability::StabilityClassifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-event collection of variable trackers.
///
/// Trackers are created lazily on first sight of a variable name; there is no
/// cross-name ordering guarantee within one `add_data` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSet {
    trackers: BTreeMap<String, VariableTracker>,
    min_samples: usize,
    classifier: StabilityClassifier,
}

impl TrackerSet {
    /// Create an empty set; every tracker it grows shares these settings.
    pub fn new(min_samples: usize, classifier: StabilityClassifier) -> Self {
        Self {
            trackers: BTreeMap::new(),
            min_samples,
            classifier,
        }
    }

    /// Feed one observation record, creating trackers for unseen names.
    pub fn add_data(&mut self, record: &Record) {
        for (name, value) in record {
            self.trackers
                .entry(name.clone())
                .or_insert_with(|| {
                    VariableTracker::new(self.min_samples, self.classifier.clone())
                })
                .add_value(value);
        }
    }

    /// Names of all tracked variables.
    pub fn variables(&self) -> Vec<String> {
        self.trackers.keys().cloned().collect()
    }

    /// Tracker for one variable, if seen.
    pub fn tracker(&self, name: &str) -> Option<&VariableTracker> {
        self.trackers.get(name)
    }

    /// Classify every tracked variable.
    pub fn classify_all(&self) -> BTreeMap<String, Classification> {
        self.trackers
            .iter()
            .map(|(name, tracker)| (name.clone(), tracker.classify()))
            .collect()
    }

    /// Names whose current classification matches `kind`.
    ///
    /// Used to discover, e.g., which variables are stable when
    /// auto-configuring combination detectors.
    pub fn variables_with_classification(&self, kind: ClassificationKind) -> Vec<String> {
        self.trackers
            .iter()
            .filter(|(_, tracker)| tracker.classify().kind == kind)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
