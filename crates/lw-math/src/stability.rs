//! Segmented stability test over run-length-encoded change histories.
//!
//! A variable is "stable" when its value-novelty rate decays over time. The
//! test splits the logical history into N contiguous equal segments and
//! requires each segment's mean change rate to stay strictly below a
//! per-segment ceiling, with ceilings decreasing from loosest to strictest.
//!
//! The computation walks the runs once and accumulates per-segment overlap
//! counts, so cost is O(#runs × N) and the sequence is never expanded. The
//! result is numerically identical to expanding the sequence and averaging
//! each segment.

use crate::rle::RunLengthSequence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of segments.
pub const DEFAULT_SEGMENTS: usize = 4;

/// Default per-segment ceilings, loosest to strictest.
///
/// The first ceiling sits above 1.0: every value is novel at the start of a
/// stream, so the earliest window is effectively unconstrained and stability
/// is decided by the decay in later windows.
pub const DEFAULT_SEGMENT_THRESHOLDS: [f64; 4] = [1.25, 0.75, 0.35, 0.15];

/// Errors from classifier construction.
#[derive(Debug, Error, PartialEq)]
pub enum StabilityError {
    #[error("segment count must be at least 1")]
    NoSegments,

    #[error("segment/threshold count mismatch: {segments} segments, {thresholds} thresholds")]
    SegmentMismatch { segments: usize, thresholds: usize },

    #[error("threshold at index {index} must be finite and positive, got {value}")]
    InvalidThreshold { index: usize, value: f64 },

    #[error("thresholds must be strictly decreasing, got {0:?}")]
    ThresholdOrder(Vec<f64>),
}

/// Result type for classifier construction.
pub type StabilityResult<T> = Result<T, StabilityError>;

/// Stability test over a boolean change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityClassifier {
    thresholds: Vec<f64>,
}

impl Default for StabilityClassifier {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_SEGMENT_THRESHOLDS.to_vec(),
        }
    }
}

impl StabilityClassifier {
    /// Create a classifier with `segments` segments and one ceiling each.
    ///
    /// Fails fast on a segment/threshold count mismatch, non-finite or
    /// non-positive ceilings, and ceilings that are not strictly decreasing.
    pub fn new(segments: usize, thresholds: Vec<f64>) -> StabilityResult<Self> {
        if segments == 0 {
            return Err(StabilityError::NoSegments);
        }
        if segments != thresholds.len() {
            return Err(StabilityError::SegmentMismatch {
                segments,
                thresholds: thresholds.len(),
            });
        }
        for (index, &value) in thresholds.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(StabilityError::InvalidThreshold { index, value });
            }
        }
        if thresholds.windows(2).any(|pair| pair[1] >= pair[0]) {
            return Err(StabilityError::ThresholdOrder(thresholds));
        }
        Ok(Self { thresholds })
    }

    /// Number of segments.
    pub fn segments(&self) -> usize {
        self.thresholds.len()
    }

    /// Per-segment ceilings, loosest to strictest.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Mean change rate per segment, computed directly over runs.
    ///
    /// The logical range `[0, len)` is split into N contiguous equal-sized
    /// segments, the last absorbing the remainder. A segment that covers no
    /// samples has an undefined (NaN) mean; that happens only when
    /// `len < segments`.
    pub fn segment_means(&self, changes: &RunLengthSequence<bool>) -> Vec<f64> {
        let n = self.thresholds.len();
        let len = changes.len();
        let base = len / n;

        let seg_start = |i: usize| i * base;
        let seg_end = |i: usize| if i + 1 == n { len } else { (i + 1) * base };

        let mut sums = vec![0usize; n];
        let mut counts = vec![0usize; n];

        let mut pos = 0usize;
        for run in changes.runs() {
            let run_start = pos;
            let run_end = pos + run.count;
            pos = run_end;

            for i in 0..n {
                let start = seg_start(i);
                let end = seg_end(i);
                if end <= run_start {
                    continue;
                }
                if start >= run_end {
                    break;
                }
                let overlap = run_end.min(end) - run_start.max(start);
                counts[i] += overlap;
                if run.value {
                    sums[i] += overlap;
                }
            }
        }

        sums.iter()
            .zip(&counts)
            .map(|(&sum, &count)| sum as f64 / count as f64)
            .collect()
    }

    /// True iff every segment mean is strictly below its ceiling.
    ///
    /// The empty sequence is vacuously stable. A segment with an undefined
    /// (NaN) mean fails the strict comparison and reports unstable.
    pub fn is_stable(&self, changes: &RunLengthSequence<bool>) -> bool {
        if changes.is_empty() {
            return true;
        }
        self.segment_means(changes)
            .iter()
            .zip(&self.thresholds)
            .all(|(mean, threshold)| mean < threshold)
    }
}
