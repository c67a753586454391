//! Scheduling infrastructure for the widget rotation
//!
//! The scheduler follows the runtime rules used across the crate:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on widget calls and task joins
//! - Structured tracing with `RotationMetrics` integration

pub mod error;
pub mod rotation_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use rotation_scheduler::{RotationScheduler, RotationSchedulerConfig};
