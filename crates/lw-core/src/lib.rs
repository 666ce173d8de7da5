//! Logwarden behavioral-baseline engine.
//!
//! The engine incrementally learns, per log-event type and per variable, how
//! volatile a value is over time. Upstream parsers hand it structured
//! `(event_id, template, positional_variables, named_variables)` tuples;
//! detectors read classifications and accumulated data back out.
//!
//! # Components
//!
//! - [`tracker::VariableTracker`] / [`tracker_set::TrackerSet`] — per-variable
//!   novelty state over a run-length-encoded change history
//! - [`store`] — interchangeable per-event storage backends behind one
//!   ingest contract
//! - [`orchestrator::BaselineOrchestrator`] — owns one store per event id,
//!   applies blacklists, and is the sole query entry point
//!
//! # Concurrency
//!
//! Single-threaded and synchronous: every operation runs to completion on the
//! caller's thread. Callers needing parallelism serialize externally (one
//! orchestrator per worker, or an external lock).

pub mod logging;
pub mod orchestrator;
pub mod store;
pub mod tracker;
pub mod tracker_set;

pub use lw_common::{Error, EventId, Frame, Record, Result};
pub use lw_config::{BackendSettings, BlacklistSettings, ClassifierSettings, EngineSettings};
pub use orchestrator::BaselineOrchestrator;
pub use store::{EventData, EventStore, StoreData};
pub use tracker::{Classification, ClassificationKind, VariableTracker};
pub use tracker_set::TrackerSet;
