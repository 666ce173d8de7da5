//! Eager, unbounded frame store.

use super::{EventData, EventStore, StoreData};
use lw_common::{Error, Frame, Record, Result};

/// One growing table per event; every ingest concatenates onto it.
///
/// Unbounded by design: suitable when volume is bounded externally (batch
/// jobs, capped replay windows).
#[derive(Debug, Clone, Default)]
pub struct FullFrameStore {
    frame: Frame,
}

impl FullFrameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current row count.
    pub fn row_count(&self) -> usize {
        self.frame.len()
    }
}

impl EventStore for FullFrameStore {
    fn to_data(&self, record: Record) -> StoreData {
        StoreData::Rows(Frame::single(record))
    }

    fn add_data(&mut self, data: StoreData) -> Result<()> {
        match data {
            StoreData::Rows(rows) => {
                self.frame.append(rows);
                Ok(())
            }
            other => Err(Error::BackendMismatch {
                expected: "rows",
                got: other.shape(),
            }),
        }
    }

    fn get_data(&self) -> EventData {
        EventData::Frame(self.frame.clone())
    }

    fn get_variables(&self) -> Vec<String> {
        self.frame.variables().into_iter().collect()
    }
}
