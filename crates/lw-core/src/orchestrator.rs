//! Per-event store ownership, blacklist filtering, and query entry point.

use crate::store::{ChunkedFrameStore, EventData, EventStore, FullFrameStore, TrackerStore};
use crate::tracker::{Classification, ClassificationKind};
use lw_common::{Error, EventId, Record, Result};
use lw_config::{BackendSettings, EngineSettings};
use lw_math::stability::StabilityClassifier;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

/// Owns one [`EventStore`] per event id and records each event's template.
///
/// Stores are created lazily on first ingest for an id and never merged
/// across ids. The backend kind is fixed at construction and not switchable
/// per event. Single-writer: concurrent ingestion without external
/// synchronization is unsupported.
#[derive(Debug)]
pub struct BaselineOrchestrator {
    backend: BackendSettings,
    min_samples: usize,
    classifier: StabilityClassifier,
    blacklist_names: HashSet<String>,
    blacklist_positions: HashSet<usize>,
    stores: HashMap<EventId, Box<dyn EventStore>>,
    templates: HashMap<EventId, String>,
}

impl BaselineOrchestrator {
    /// Build an orchestrator from validated settings.
    ///
    /// Fails fast on any configuration error; an orchestrator is never
    /// constructed from settings that would degrade later.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        let classifier = StabilityClassifier::new(
            settings.classifier.segments,
            settings.classifier.segment_thresholds.clone(),
        )
        .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            backend: settings.backend,
            min_samples: settings.classifier.min_samples,
            classifier,
            blacklist_names: settings.blacklist.names.into_iter().collect(),
            blacklist_positions: settings.blacklist.positions.into_iter().collect(),
            stores: HashMap::new(),
            templates: HashMap::new(),
        })
    }

    /// Ingest one structured observation.
    ///
    /// Positional variables are renamed `var_<index>`; blacklisted names and
    /// positions are dropped before storage. A named variable colliding with
    /// an included positional key is a caller contract violation. An
    /// empty-after-blacklist record still creates the store entry.
    pub fn ingest_event(
        &mut self,
        event_id: impl Into<EventId>,
        template: &str,
        positional_variables: &[String],
        named_variables: &Record,
    ) -> Result<()> {
        let event_id = event_id.into();
        let record = self.build_record(positional_variables, named_variables)?;

        let store = match self.stores.entry(event_id.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(build_store(
                &self.backend,
                self.min_samples,
                &self.classifier,
            )?),
        };

        debug!(event_id = %event_id, variables = record.len(), "ingesting event");
        let data = store.to_data(record);
        store.add_data(data)?;

        // Last-write-wins; a drift in template for a known id is flagged,
        // not rejected.
        if let Some(previous) = self.templates.insert(event_id.clone(), template.to_string()) {
            if previous != template {
                warn!(event_id = %event_id, "template changed for event id; keeping latest");
            }
        }
        Ok(())
    }

    /// Combine named and positional variables under the blacklist.
    fn build_record(
        &self,
        positional_variables: &[String],
        named_variables: &Record,
    ) -> Result<Record> {
        let mut record = Record::new();

        for (index, value) in positional_variables.iter().enumerate() {
            if self.blacklist_positions.contains(&index) {
                continue;
            }
            record.insert(format!("var_{}", index), value.clone());
        }

        for (name, value) in named_variables {
            if self.blacklist_names.contains(name) {
                continue;
            }
            if record.contains_key(name) {
                return Err(Error::KeyCollision { key: name.clone() });
            }
            record.insert(name.clone(), value.clone());
        }

        Ok(record)
    }

    /// Accumulated data for an event, `None` if the id was never ingested.
    pub fn get_event_data(&self, event_id: impl Into<EventId>) -> Option<EventData> {
        self.stores.get(&event_id.into()).map(|s| s.get_data())
    }

    /// Template last recorded for an event id.
    pub fn get_event_template(&self, event_id: impl Into<EventId>) -> Option<&str> {
        self.templates.get(&event_id.into()).map(String::as_str)
    }

    /// All recorded templates by event id.
    pub fn get_event_templates(&self) -> &HashMap<EventId, String> {
        &self.templates
    }

    /// All event ids seen so far, sorted for deterministic output.
    pub fn event_ids(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = self.stores.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Variables observed for an event id; empty if never ingested.
    pub fn get_event_variables(&self, event_id: impl Into<EventId>) -> Vec<String> {
        self.stores
            .get(&event_id.into())
            .map(|s| s.get_variables())
            .unwrap_or_default()
    }

    /// Variables of an event whose classification matches `kind`.
    ///
    /// Meaningful only for tracker-backed stores; empty otherwise.
    pub fn variables_with_classification(
        &self,
        event_id: impl Into<EventId>,
        kind: ClassificationKind,
    ) -> Vec<String> {
        self.stores
            .get(&event_id.into())
            .map(|s| s.variables_with_classification(kind))
            .unwrap_or_default()
    }

    /// Full classification map for a tracker-backed event, `None` for
    /// unknown ids or frame-backed stores.
    pub fn classify_event(
        &self,
        event_id: impl Into<EventId>,
    ) -> Option<BTreeMap<String, Classification>> {
        match self.stores.get(&event_id.into()).map(|s| s.get_data()) {
            Some(EventData::Classifications(verdicts)) => Some(verdicts),
            _ => None,
        }
    }

    /// Export the accumulated state of every event store.
    ///
    /// This is the hook for collaborators that persist state periodically;
    /// the engine itself keeps everything in memory.
    pub fn export_events(&self) -> BTreeMap<EventId, EventData> {
        self.stores
            .iter()
            .map(|(id, store)| (id.clone(), store.get_data()))
            .collect()
    }
}

/// Store factory captured by the orchestrator's settings.
fn build_store(
    backend: &BackendSettings,
    min_samples: usize,
    classifier: &StabilityClassifier,
) -> Result<Box<dyn EventStore>> {
    Ok(match backend {
        BackendSettings::FullFrame => Box::new(FullFrameStore::new()),
        BackendSettings::ChunkedFrame {
            max_rows,
            compact_every,
        } => Box::new(ChunkedFrameStore::new(*max_rows, *compact_every)?),
        BackendSettings::Tracker => Box::new(TrackerStore::new(min_samples, classifier.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_config::ClassifierSettings;

    fn named(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn positional(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn orchestrator(settings: EngineSettings) -> BaselineOrchestrator {
        BaselineOrchestrator::new(settings).expect("settings are valid")
    }

    #[test]
    fn test_invalid_settings_rejected_at_construction() {
        let mut settings = EngineSettings::default();
        settings.classifier = ClassifierSettings {
            min_samples: 3,
            segments: 4,
            segment_thresholds: vec![0.5, 0.25],
        };
        let err = BaselineOrchestrator::new(settings).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_orchestrator_is_debuggable_with_live_stores() {
        // Debug must reach through the boxed stores; assertion helpers like
        // unwrap_err rely on it.
        let mut orch = orchestrator(EngineSettings::default());
        orch.ingest_event(1u64, "t", &positional(&["x"]), &Record::new())
            .unwrap();

        let rendered = format!("{:?}", orch);
        assert!(rendered.contains("BaselineOrchestrator"));
    }

    #[test]
    fn test_positional_variables_are_renamed() {
        let mut orch = orchestrator(EngineSettings::default());
        orch.ingest_event(1u64, "a <*> b <*>", &positional(&["x", "y"]), &Record::new())
            .unwrap();

        assert_eq!(orch.get_event_variables(1u64), vec!["var_0", "var_1"]);
    }

    #[test]
    fn test_blacklists_filter_names_and_positions() {
        let mut settings = EngineSettings::default();
        settings.blacklist.names = vec!["timestamp".to_string()];
        settings.blacklist.positions = vec![0];

        let mut orch = orchestrator(settings);
        orch.ingest_event(
            1u64,
            "t",
            &positional(&["dropped", "kept"]),
            &named(&[("timestamp", "12:00"), ("level", "INFO")]),
        )
        .unwrap();

        assert_eq!(orch.get_event_variables(1u64), vec!["level", "var_1"]);
    }

    #[test]
    fn test_key_collision_is_an_error() {
        let mut orch = orchestrator(EngineSettings::default());
        let err = orch
            .ingest_event(
                1u64,
                "t",
                &positional(&["x"]),
                &named(&[("var_0", "conflicting")]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::KeyCollision { key } if key == "var_0"));
    }

    #[test]
    fn test_blacklisted_position_does_not_collide() {
        let mut settings = EngineSettings::default();
        settings.blacklist.positions = vec![0];

        let mut orch = orchestrator(settings);
        // var_0 is excluded by position, so the named key is free to use it.
        orch.ingest_event(1u64, "t", &positional(&["x"]), &named(&[("var_0", "ok")]))
            .unwrap();
        assert_eq!(orch.get_event_variables(1u64), vec!["var_0"]);
    }

    #[test]
    fn test_empty_after_blacklist_still_creates_store() {
        let mut settings = EngineSettings::default();
        settings.blacklist.names = vec!["only".to_string()];

        let mut orch = orchestrator(settings);
        orch.ingest_event(9u64, "t", &[], &named(&[("only", "v")]))
            .unwrap();

        assert!(orch.get_event_data(9u64).is_some());
        assert!(orch.get_event_variables(9u64).is_empty());
    }

    #[test]
    fn test_template_last_write_wins() {
        let mut orch = orchestrator(EngineSettings::default());
        orch.ingest_event(1u64, "first <*>", &[], &Record::new())
            .unwrap();
        orch.ingest_event(1u64, "second <*>", &[], &Record::new())
            .unwrap();

        assert_eq!(orch.get_event_template(1u64), Some("second <*>"));
        assert_eq!(orch.get_event_templates().len(), 1);
    }

    #[test]
    fn test_unknown_id_queries_return_empty() {
        let orch = orchestrator(EngineSettings::default());
        assert!(orch.get_event_data(404u64).is_none());
        assert!(orch.get_event_template(404u64).is_none());
        assert!(orch.get_event_variables(404u64).is_empty());
        assert!(orch
            .variables_with_classification(404u64, ClassificationKind::Stable)
            .is_empty());
        assert!(orch.classify_event(404u64).is_none());
    }

    #[test]
    fn test_string_and_numeric_ids_are_isolated() {
        let mut orch = orchestrator(EngineSettings::default());
        orch.ingest_event(3u64, "numeric", &positional(&["a"]), &Record::new())
            .unwrap();
        orch.ingest_event("3", "named", &[], &named(&[("level", "INFO")]))
            .unwrap();

        assert_eq!(orch.get_event_variables(3u64), vec!["var_0"]);
        assert_eq!(orch.get_event_variables("3"), vec!["level"]);
        assert_eq!(orch.event_ids().len(), 2);
    }

    #[test]
    fn test_classify_event_is_none_for_frame_backends() {
        let mut orch = orchestrator(EngineSettings::default());
        orch.ingest_event(1u64, "t", &[], &named(&[("level", "INFO")]))
            .unwrap();
        assert!(orch.classify_event(1u64).is_none());
    }
}
