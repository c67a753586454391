//! Observability infrastructure for rotation metrics
//!
//! ## Design Principles
//!
//! 1. **Future-Proof Returns**: All record methods return `MetricsResult<()>`
//!    so callers already handle failures, but recording currently always
//!    succeeds.
//!
//! 2. **Memory Ordering**: SeqCst for counters feeding derived metrics
//!    (averages), Relaxed for independent counters.
//!
//! ## Error Handling
//!
//! ```rust
//! use rotaboard_infra::observability::metrics::RotationMetrics;
//!
//! let metrics = RotationMetrics::new();
//!
//! if let Err(e) = metrics.record_cycle() {
//!     tracing::warn!("Failed to record metric: {}", e);
//! }
//! ```

pub mod metrics;

/// Metrics error type
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Empty data set - cannot calculate aggregate metric
    #[error("Empty data: cannot calculate {metric}")]
    EmptyData {
        /// Metric name that failed (e.g., "average widget time")
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
