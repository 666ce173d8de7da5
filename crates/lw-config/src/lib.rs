//! Logwarden engine settings.
//!
//! Settings select the event-store backend, tune the stability classifier,
//! and declare variable blacklists. They are plain serde types loadable from
//! YAML; semantic validation lives in [`validate`] and fails fast at
//! construction — an orchestrator is never built from unvalidated settings.

pub mod settings;
pub mod validate;

pub use settings::{
    BackendSettings, BlacklistSettings, ClassifierSettings, EngineSettings, DEFAULT_COMPACT_EVERY,
    DEFAULT_MIN_SAMPLES,
};
pub use validate::{validate_settings, ValidationError, ValidationResult};
