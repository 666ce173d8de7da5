//! Tracker-backed store: per-variable change state instead of raw rows.

use super::{EventData, EventStore, StoreData};
use crate::tracker::ClassificationKind;
use crate::tracker_set::TrackerSet;
use lw_common::{Error, Record, Result};
use lw_math::stability::StabilityClassifier;

/// Adapts a [`TrackerSet`] to the store contract.
///
/// Memory is O(#variables × #runs) rather than O(#rows): the backend of
/// choice for unbounded streams where detectors only need classifications.
#[derive(Debug, Clone)]
pub struct TrackerStore {
    trackers: TrackerSet,
}

impl TrackerStore {
    /// Create a store whose trackers share the given classifier settings.
    pub fn new(min_samples: usize, classifier: StabilityClassifier) -> Self {
        Self {
            trackers: TrackerSet::new(min_samples, classifier),
        }
    }

    /// Read-only view of the underlying tracker set.
    pub fn trackers(&self) -> &TrackerSet {
        &self.trackers
    }
}

impl EventStore for TrackerStore {
    fn to_data(&self, record: Record) -> StoreData {
        StoreData::Record(record)
    }

    fn add_data(&mut self, data: StoreData) -> Result<()> {
        match data {
            StoreData::Record(record) => {
                self.trackers.add_data(&record);
                Ok(())
            }
            other => Err(Error::BackendMismatch {
                expected: "record",
                got: other.shape(),
            }),
        }
    }

    fn get_data(&self) -> EventData {
        EventData::Classifications(self.trackers.classify_all())
    }

    fn get_variables(&self) -> Vec<String> {
        self.trackers.variables()
    }

    fn variables_with_classification(&self, kind: ClassificationKind) -> Vec<String> {
        self.trackers.variables_with_classification(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_common::Frame;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store(min_samples: usize) -> TrackerStore {
        TrackerStore::new(min_samples, StabilityClassifier::default())
    }

    #[test]
    fn test_forwards_records_to_trackers() {
        let mut store = store(2);
        for i in 0..6 {
            let data = store.to_data(record(&[("constant", "x"), ("counter", &i.to_string())]));
            store.add_data(data).unwrap();
        }

        match store.get_data() {
            EventData::Classifications(verdicts) => {
                assert_eq!(verdicts["constant"].kind, ClassificationKind::Static);
                assert_eq!(verdicts["counter"].kind, ClassificationKind::Random);
            }
            other => panic!("expected classifications, got {:?}", other),
        }
        assert_eq!(store.get_variables(), vec!["constant", "counter"]);
        assert_eq!(
            store.variables_with_classification(ClassificationKind::Static),
            vec!["constant"]
        );
    }

    #[test]
    fn test_rejects_rows_payload() {
        let mut store = store(2);
        let err = store
            .add_data(StoreData::Rows(Frame::single(record(&[("x", "1")]))))
            .unwrap_err();
        assert!(matches!(err, Error::BackendMismatch { .. }));
    }
}
