//! Chunked frame store with bounded retention and periodic compaction.

use super::{EventData, EventStore, StoreData};
use lw_common::{Error, Frame, Record, Result};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Appends one chunk per ingest, evicts oldest rows past `max_rows`, and
/// merges the chunk list once it grows past `compact_every` fragments.
///
/// Eviction is exact and oldest-first: whole chunks are dropped while the
/// overflow covers them, then the remainder is trimmed off the head of the
/// new oldest chunk. Compaction runs synchronously inside `add_data` and
/// costs one O(row_count) copy; between compactions appends are copy-free.
#[derive(Debug, Clone)]
pub struct ChunkedFrameStore {
    chunks: VecDeque<Frame>,
    max_rows: Option<usize>,
    compact_every: usize,
    row_count: usize,
}

impl ChunkedFrameStore {
    /// Create a store with the given retention bound and compaction cadence.
    ///
    /// Fails fast: `max_rows` of zero and `compact_every` of zero are
    /// configuration errors.
    pub fn new(max_rows: Option<usize>, compact_every: usize) -> Result<Self> {
        if max_rows == Some(0) {
            return Err(Error::InvalidValue {
                field: "max_rows".to_string(),
                message: "must be at least 1 when set".to_string(),
            });
        }
        if compact_every == 0 {
            return Err(Error::InvalidValue {
                field: "compact_every".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            chunks: VecDeque::new(),
            max_rows,
            compact_every,
            row_count: 0,
        })
    }

    /// Current retained row count. Always `<= max_rows` when a bound is set.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Current chunk-list length. Bounded by `compact_every + 1`.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Drop oldest rows until the retention bound holds again.
    fn evict(&mut self) {
        let Some(max_rows) = self.max_rows else {
            return;
        };
        let before = self.row_count;
        while self.row_count > max_rows {
            let overflow = self.row_count - max_rows;
            let Some(front) = self.chunks.front_mut() else {
                break;
            };
            if front.is_empty() {
                self.chunks.pop_front();
            } else if overflow >= front.len() {
                self.row_count -= front.len();
                self.chunks.pop_front();
            } else {
                front.drop_front(overflow);
                self.row_count -= overflow;
            }
        }
        if self.row_count < before {
            debug!(
                evicted = before - self.row_count,
                retained = self.row_count,
                "evicted oldest rows past retention bound"
            );
        }
    }

    /// Merge all chunks into one once the list exceeds `compact_every`.
    fn maybe_compact(&mut self) {
        if self.chunks.len() <= self.compact_every {
            return;
        }
        let mut merged = Frame::new();
        for chunk in self.chunks.drain(..) {
            merged.append(chunk);
        }
        debug!(rows = merged.len(), "compacted chunk list into one chunk");
        self.chunks.push_back(merged);
    }
}

impl EventStore for ChunkedFrameStore {
    fn to_data(&self, record: Record) -> StoreData {
        StoreData::Rows(Frame::single(record))
    }

    fn add_data(&mut self, data: StoreData) -> Result<()> {
        let rows = match data {
            StoreData::Rows(rows) => rows,
            other => {
                return Err(Error::BackendMismatch {
                    expected: "rows",
                    got: other.shape(),
                })
            }
        };
        self.row_count += rows.len();
        self.chunks.push_back(rows);
        self.evict();
        self.maybe_compact();
        Ok(())
    }

    fn get_data(&self) -> EventData {
        let mut frame = Frame::new();
        for chunk in &self.chunks {
            frame.append(chunk.clone());
        }
        EventData::Frame(frame)
    }

    fn get_variables(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .chunks
            .iter()
            .flat_map(|chunk| chunk.variables())
            .collect();
        names.into_iter().collect()
    }
}
