//! Metrics collection modules

pub mod rotation;

pub use rotation::{RotationMetrics, RotationStats};
