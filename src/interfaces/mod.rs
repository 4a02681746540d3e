//! Outer surfaces: JSON lines input/output and in-process callback delivery.

pub mod channel;
pub mod json;
