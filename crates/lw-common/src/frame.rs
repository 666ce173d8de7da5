//! Row-oriented containers for accumulated observations.
//!
//! A [`Record`] is one observation of an event: variable name to value.
//! A [`Frame`] is an ordered list of records, oldest first. Frames are the
//! unit stored by the frame-backed event stores; eviction removes rows from
//! the front, appends add rows at the back.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single observation: variable name to observed value.
pub type Record = BTreeMap<String, String>;

/// An ordered collection of records, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    rows: Vec<Record>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame from existing rows, preserving order.
    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Create a single-row frame.
    pub fn single(record: Record) -> Self {
        Self { rows: vec![record] }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read-only view of the rows, oldest first.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Append one row at the back.
    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Append all rows of `other` at the back, preserving order.
    pub fn append(&mut self, mut other: Frame) {
        self.rows.append(&mut other.rows);
    }

    /// Drop the `n` oldest rows from the front.
    ///
    /// Dropping more rows than the frame holds empties it.
    pub fn drop_front(&mut self, n: usize) {
        if n >= self.rows.len() {
            self.rows.clear();
        } else {
            self.rows.drain(..n);
        }
    }

    /// Union of variable names appearing in any row.
    pub fn variables(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect()
    }
}
