//! Logwarden streaming math primitives.

pub mod rle;
pub mod stability;

pub use rle::{Run, RunLengthSequence};
pub use stability::{
    StabilityClassifier, StabilityError, DEFAULT_SEGMENTS, DEFAULT_SEGMENT_THRESHOLDS,
};
