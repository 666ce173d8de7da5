//! Event identity.
//!
//! A log event id names a template category: observations under the same id
//! share a structural template. Upstream parsers address events either by a
//! numeric template index or by a symbolic name, so both shapes are accepted.

use serde::{Deserialize, Serialize};

/// Identifier for a log-event (template) category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    /// Numeric template index assigned by the parser.
    Num(u64),
    /// Symbolic event name.
    Name(String),
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId::Num(id)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        EventId::Num(u64::from(id))
    }
}

impl From<&str> for EventId {
    fn from(name: &str) -> Self {
        EventId::Name(name.to_string())
    }
}

impl From<String> for EventId {
    fn from(name: String) -> Self {
        EventId::Name(name)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventId::Num(id) => write!(f, "{}", id),
            EventId::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_impls() {
        assert_eq!(EventId::from(7u64), EventId::Num(7));
        assert_eq!(EventId::from("sshd_login"), EventId::Name("sshd_login".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(EventId::Num(42).to_string(), "42");
        assert_eq!(EventId::Name("kernel_oops".into()).to_string(), "kernel_oops");
    }

    #[test]
    fn test_serde_untagged_roundtrip() {
        let num: EventId = serde_json::from_str("3").unwrap();
        assert_eq!(num, EventId::Num(3));

        let name: EventId = serde_json::from_str("\"auth_failure\"").unwrap();
        assert_eq!(name, EventId::Name("auth_failure".into()));

        assert_eq!(serde_json::to_string(&EventId::Num(3)).unwrap(), "3");
    }

    #[test]
    fn test_numeric_and_named_ids_are_distinct() {
        // "3" as a name is not the same event as template index 3.
        assert_ne!(EventId::from("3"), EventId::from(3u64));
    }
}
