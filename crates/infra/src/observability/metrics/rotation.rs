//! Rotation metrics: cycle counts, outcomes and scheduled delays
//!
//! ## Design
//! - **No locking needed** - plain atomic counters
//! - **Microsecond storage** - durations are stored in µs, reporting helpers
//!   convert to ms

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rotaboard_domain::CycleOutcome;
use serde::Serialize;

use crate::observability::{MetricsError, MetricsResult};

/// Counters maintained by the rotation scheduler
#[derive(Debug, Default)]
pub struct RotationMetrics {
    /// Number of cycles run
    pub cycles: AtomicU64,
    /// Cycles whose payload reached the listener
    pub deliveries: AtomicU64,
    /// Cycles whose widget returned an error
    pub failures: AtomicU64,
    /// Cycles whose widget exceeded the invocation timeout
    pub timeouts: AtomicU64,
    /// Total time spent waiting on widgets in microseconds
    pub total_widget_time_micros: AtomicU64,
    /// Last scheduled delay in microseconds
    pub last_delay_micros: AtomicU64,
    /// Number of scheduler starts
    pub starts: AtomicU64,
    /// Number of scheduler stops
    pub stops: AtomicU64,
}

/// Point-in-time copy of [`RotationMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RotationStats {
    pub cycles: u64,
    pub deliveries: u64,
    pub failures: u64,
    pub timeouts: u64,
    pub last_delay_ms: u64,
    pub starts: u64,
    pub stops: u64,
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

impl RotationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished cycle: its outcome and how long the widget took.
    pub fn record_cycle_outcome(
        &self,
        outcome: CycleOutcome,
        elapsed: Duration,
    ) -> MetricsResult<()> {
        self.record_cycle()?;
        self.total_widget_time_micros.fetch_add(micros(elapsed), Ordering::SeqCst);

        let counter = match outcome {
            CycleOutcome::Delivered => &self.deliveries,
            CycleOutcome::Failed => &self.failures,
            CycleOutcome::TimedOut => &self.timeouts,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn record_cycle(&self) -> MetricsResult<()> {
        // SeqCst: paired with total_widget_time_micros for averages
        self.cycles.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    pub fn record_delay(&self, delay: Duration) -> MetricsResult<()> {
        self.last_delay_micros.store(micros(delay), Ordering::Relaxed);
        Ok(())
    }

    pub fn record_start(&self) -> MetricsResult<()> {
        self.starts.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn record_stop(&self) -> MetricsResult<()> {
        self.stops.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Average time spent waiting on a widget, in milliseconds.
    ///
    /// # Errors
    /// `MetricsError::EmptyData` before the first cycle.
    pub fn avg_widget_time_ms(&self) -> MetricsResult<f64> {
        let total = self.total_widget_time_micros.load(Ordering::SeqCst);
        let count = self.cycles.load(Ordering::SeqCst);

        if count == 0 {
            return Err(MetricsError::EmptyData { metric: "average widget time" });
        }

        Ok((total as f64 / count as f64) / 1_000.0)
    }

    pub fn snapshot(&self) -> RotationStats {
        RotationStats {
            cycles: self.cycles.load(Ordering::SeqCst),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            last_delay_ms: self.last_delay_micros.load(Ordering::Relaxed) / 1_000,
            starts: self.starts.load(Ordering::Relaxed),
            stops: self.stops.load(Ordering::Relaxed),
        }
    }
}
