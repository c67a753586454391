//! Cadence policy: how long to wait between cycles

use std::time::Duration;

use rotaboard_domain::{CycleOutcome, Rank, RotationConfig};

/// Timing rules applied after every cycle.
///
/// After a delivery the wait is `base_interval * rank` of the widget that is
/// about to run, so each rank expresses how long to wait before its own
/// widget is asked again. After a failure or timeout the rotation resumes
/// after the short fixed `retry_delay`, whatever the ranks are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadencePolicy {
    pub base_interval: Duration,
    pub retry_delay: Duration,
    pub widget_timeout: Duration,
}

impl CadencePolicy {
    pub const fn new(
        base_interval: Duration,
        retry_delay: Duration,
        widget_timeout: Duration,
    ) -> Self {
        Self { base_interval, retry_delay, widget_timeout }
    }

    pub const fn from_config(config: &RotationConfig) -> Self {
        Self::new(config.base_interval(), config.retry_delay(), config.widget_timeout())
    }

    /// Delay before the next cycle, given how this one settled and the rank
    /// of the widget now at the cursor.
    pub fn next_delay(&self, outcome: CycleOutcome, upcoming: Rank) -> Duration {
        match outcome {
            CycleOutcome::Delivered => upcoming.scale(self.base_interval),
            CycleOutcome::Failed | CycleOutcome::TimedOut => self.retry_delay,
        }
    }
}

impl Default for CadencePolicy {
    fn default() -> Self {
        Self::from_config(&RotationConfig::default())
    }
}
