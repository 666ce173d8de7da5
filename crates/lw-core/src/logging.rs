//! Structured logging setup for embedders.
//!
//! The engine itself only emits `tracing` events (ingest, eviction,
//! compaction, template drift); this module is an opt-in helper for hosts
//! that have no subscriber of their own. Hosts with an existing `tracing`
//! setup should skip it entirely.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// Machine-parseable JSON lines.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "json" | "jsonl" | "structured" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Env-filter directive, e.g. `"lw_core=debug"`. Falls back to
    /// `RUST_LOG`, then to `"info"`.
    #[serde(default)]
    pub filter: Option<String>,
}

/// Install a global subscriber writing to stderr.
///
/// Returns an error if a global subscriber is already set; callers that may
/// initialize twice (tests, embedders) should treat that as non-fatal.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let filter = match &config.filter {
        Some(directive) => EnvFilter::try_new(directive).map_err(|e| e.to_string())?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Human => builder.try_init().map_err(|e| e.to_string()),
        LogFormat::Json => builder.json().try_init().map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(LogFormat::from_str("human"), Ok(LogFormat::Human));
        assert_eq!(LogFormat::from_str("JSONL"), Ok(LogFormat::Json));
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Human);
        assert!(config.filter.is_none());
    }
}
