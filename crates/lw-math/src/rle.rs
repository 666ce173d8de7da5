//! Append-only run-length-encoded sequences.
//!
//! [`RunLengthSequence`] stores a logical sequence as `(value, count)` runs,
//! merging equal consecutive appends. It is the memory-bounded backbone of the
//! per-variable change history: long stretches of "value did not change"
//! collapse into a single run.
//!
//! # Memory Guarantees
//!
//! Memory is O(#runs) independent of the logical length for runs of repeated
//! values. Fully alternating input degrades to O(length); that is the
//! worst case, not the expected one for converging variables.
//!
//! # Invariants
//!
//! - No two adjacent runs share a value (maximal merging)
//! - `len() == Σ run.count == number of appends`
//! - Append-only: no delete, update, or truncate operations exist

use serde::{Deserialize, Serialize};

/// One run: a value and how many consecutive times it was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run<T> {
    /// The repeated value.
    pub value: T,
    /// Number of consecutive appends of `value`. Always >= 1.
    pub count: usize,
}

/// Append-only sequence stored as maximally merged runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLengthSequence<T> {
    runs: Vec<Run<T>>,
    len: usize,
}

impl<T> Default for RunLengthSequence<T> {
    fn default() -> Self {
        Self {
            runs: Vec::new(),
            len: 0,
        }
    }
}

impl<T> RunLengthSequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total logical length: the number of appends so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the `(value, count)` runs in order.
    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    /// Iterate the expanded logical sequence in append order.
    ///
    /// Each call returns a fresh iterator; re-iteration replays from the
    /// start without consuming state.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat(&run.value).take(run.count))
    }
}

impl<T: PartialEq> RunLengthSequence<T> {
    /// Append one value, extending the last run when the value matches.
    ///
    /// O(1) amortized.
    pub fn append(&mut self, value: T) {
        match self.runs.last_mut() {
            Some(last) if last.value == value => last.count += 1,
            _ => self.runs.push(Run { value, count: 1 }),
        }
        self.len += 1;
    }
}

impl<T: PartialEq> FromIterator<T> for RunLengthSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        for value in iter {
            seq.append(value);
        }
        seq
    }
}
