//! # Rotaboard Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The tokio-driven rotation scheduler
//! - Configuration loading (files and environment)
//! - Rotation metrics
//! - HTTP JSON widget adapter
//! - In-memory bot locator
//!
//! ## Architecture
//! - Implements traits defined in `rotaboard-core`
//! - Depends on `rotaboard-domain` and `rotaboard-core`
//! - Contains all "impure" code (I/O, timers, spawned tasks)

pub mod config;
pub mod errors;
pub mod observability;
pub mod routing;
pub mod scheduling;
pub mod widgets;

// Re-export commonly used items
pub use errors::InfraError;
pub use observability::metrics::{RotationMetrics, RotationStats};
pub use routing::InMemoryBotLocator;
pub use scheduling::{RotationScheduler, RotationSchedulerConfig, SchedulerError, SchedulerResult};
pub use widgets::{build_http_widgets, widgets_with_client, HttpJsonWidget};
