//! Interchangeable per-event storage backends.
//!
//! Every backend implements the same ingest contract: `to_data` shapes a
//! combined record for the backend, `add_data` ingests it, `get_data`
//! materializes the accumulated state on demand. Backends trade memory bound,
//! materialization cost, and query shape:
//!
//! - [`FullFrameStore`] — one growing table, unbounded, simplest
//! - [`ChunkedFrameStore`] — chunked append, bounded retention, periodic
//!   compaction
//! - [`TrackerStore`] — per-variable change trackers instead of raw rows

mod chunked;
mod full;
mod tracker_store;

pub use chunked::ChunkedFrameStore;
pub use full::FullFrameStore;
pub use tracker_store::TrackerStore;

use crate::tracker::{Classification, ClassificationKind};
use lw_common::{Frame, Record, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend-shaped ingest payload produced by [`EventStore::to_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreData {
    /// Row fragment for the frame-backed stores.
    Rows(Frame),
    /// Raw record for the tracker-backed store.
    Record(Record),
}

impl StoreData {
    /// Shape name, used in backend-mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            StoreData::Rows(_) => "rows",
            StoreData::Record(_) => "record",
        }
    }
}

/// Backend-shaped query result returned by [`EventStore::get_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventData {
    /// Accumulated rows, oldest first.
    Frame(Frame),
    /// Current per-variable classifications.
    Classifications(BTreeMap<String, Classification>),
}

/// Capability contract shared by all per-event storage backends.
///
/// One store holds the observations of exactly one event id; stores are never
/// merged across ids. Implementations are synchronous and single-writer.
pub trait EventStore: std::fmt::Debug {
    /// Convert a combined record into this backend's ingest shape.
    fn to_data(&self, record: Record) -> StoreData;

    /// Ingest one payload produced by [`EventStore::to_data`].
    ///
    /// Feeding a payload of the wrong shape is a caller contract violation
    /// and returns [`lw_common::Error::BackendMismatch`].
    fn add_data(&mut self, data: StoreData) -> Result<()>;

    /// Materialize the accumulated state. Not cached.
    fn get_data(&self) -> EventData;

    /// Names of all variables observed so far.
    fn get_variables(&self) -> Vec<String>;

    /// Names whose current classification matches `kind`.
    ///
    /// Meaningful only for tracker-backed stores; frame backends return
    /// an empty list.
    fn variables_with_classification(&self, kind: ClassificationKind) -> Vec<String> {
        let _ = kind;
        Vec::new()
    }
}
