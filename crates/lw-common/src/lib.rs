//! Logwarden common types and errors.
//!
//! This crate provides foundational types shared across lw-core modules:
//! - Event identity (`EventId`)
//! - Row-oriented observation containers (`Record`, `Frame`)
//! - The unified error type with stable codes and categories

pub mod error;
pub mod frame;
pub mod id;

pub use error::{Error, ErrorCategory, Result};
pub use frame::{Frame, Record};
pub use id::EventId;
