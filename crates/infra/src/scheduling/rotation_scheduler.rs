//! Rotation scheduler: drives the widget rotation on a background task.
//!
//! Each cycle invokes the widget at the cursor, hands a successful payload to
//! the listener, advances the cursor and then waits for the delay chosen by
//! [`CadencePolicy`]. The loop runs until its cancellation token fires;
//! cancellation interrupts both an in-flight widget call and the wait.
//!
//! The rotation is moved into the spawned task and handed back through its
//! join handle, so a stopped scheduler can be started again and resumes at
//! the same cursor position. The task also publishes its cursor after every
//! cycle; if the task dies or has to be aborted, the next `start` rebuilds
//! the rotation from the widget list at the last published position.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rotaboard_core::Widget;
//! use rotaboard_domain::WidgetPayload;
//! use rotaboard_infra::observability::metrics::RotationMetrics;
//! use rotaboard_infra::scheduling::{RotationScheduler, RotationSchedulerConfig};
//!
//! # async fn example(widgets: Vec<Arc<dyn Widget>>) -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(RotationMetrics::new());
//! let mut scheduler =
//!     RotationScheduler::new(widgets, RotationSchedulerConfig::default(), metrics)?;
//!
//! scheduler.start(Arc::new(|payload: WidgetPayload| println!("{payload}")))?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rotaboard_core::{run_cycle, CadencePolicy, ResultListener, Rotation, Widget};
use rotaboard_domain::RotationConfig;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::observability::metrics::RotationMetrics;
use crate::observability::MetricsResult;
use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Configuration for the rotation scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSchedulerConfig {
    /// Wait after a delivery, multiplied by the upcoming widget's rank
    pub base_interval: Duration,
    /// Wait after a failed or timed out cycle
    pub retry_delay: Duration,
    /// Upper bound on a single widget call
    pub widget_timeout: Duration,
    /// How long `stop` waits for the loop task
    pub join_timeout: Duration,
}

impl RotationSchedulerConfig {
    pub const fn policy(&self) -> CadencePolicy {
        CadencePolicy::new(self.base_interval, self.retry_delay, self.widget_timeout)
    }
}

impl Default for RotationSchedulerConfig {
    fn default() -> Self {
        Self::from(&RotationConfig::default())
    }
}

impl From<&RotationConfig> for RotationSchedulerConfig {
    fn from(config: &RotationConfig) -> Self {
        Self {
            base_interval: config.base_interval(),
            retry_delay: config.retry_delay(),
            widget_timeout: config.widget_timeout(),
            join_timeout: config.join_timeout(),
        }
    }
}

/// Self-pacing scheduler over a fixed widget rotation
pub struct RotationScheduler {
    widgets: Vec<Arc<dyn Widget>>,
    /// Present while idle; owned by the loop task while running
    rotation: Option<Rotation>,
    /// Cursor published by the current loop task
    cursor: Arc<AtomicUsize>,
    config: RotationSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: Option<JoinHandle<Rotation>>,
    metrics: Arc<RotationMetrics>,
}

impl RotationScheduler {
    /// Create a scheduler positioned on the first widget.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::EmptyRotation` if `widgets` is empty
    pub fn new(
        widgets: Vec<Arc<dyn Widget>>,
        config: RotationSchedulerConfig,
        metrics: Arc<RotationMetrics>,
    ) -> SchedulerResult<Self> {
        let rotation =
            Rotation::new(widgets.clone()).map_err(|_| SchedulerError::EmptyRotation)?;

        Ok(Self {
            widgets,
            rotation: Some(rotation),
            cursor: Arc::new(AtomicUsize::new(0)),
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: None,
            metrics,
        })
    }

    /// Start the rotation on a background task
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::AlreadyRunning` if the loop is active and
    /// `SchedulerError::StartFailed` if the rotation cannot be rebuilt.
    #[instrument(skip(self, listener))]
    pub fn start(&mut self, listener: Arc<dyn ResultListener>) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }
        if self.task_handle.take().is_some() {
            warn!("Previous rotation task exited on its own; discarding it");
        }

        let rotation = self.take_rotation()?;
        info!(
            widgets = ?rotation.widget_names(),
            position = rotation.position(),
            "Starting rotation scheduler"
        );

        // Fresh token and cursor so the scheduler can be restarted after stop
        self.cancellation_token = CancellationToken::new();
        self.cursor = Arc::new(AtomicUsize::new(rotation.position()));

        let handle = tokio::spawn(Self::rotation_loop(
            rotation,
            listener,
            self.config.policy(),
            self.cancellation_token.clone(),
            Arc::clone(&self.cursor),
            Arc::clone(&self.metrics),
        ));
        self.task_handle = Some(handle);

        log_metric(self.metrics.record_start(), "scheduler.rotation.start");
        Ok(())
    }

    /// Stop the rotation gracefully
    ///
    /// Cancels the loop, awaits its task and keeps the returned rotation so a
    /// later `start` resumes at the same cursor. A task that already exited
    /// is joined as well, so its failure is reported here.
    ///
    /// A task that misses the join timeout is aborted. Either way the
    /// scheduler is left idle and can be started again.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::NotRunning` if no task was started,
    /// `Timeout` if the task does not finish within the join timeout, and
    /// `TaskJoinFailed` if it panicked.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let Some(mut handle) = self.task_handle.take() else {
            return Err(SchedulerError::NotRunning);
        };

        info!("Stopping rotation scheduler");
        self.cancellation_token.cancel();

        let join_timeout = self.config.join_timeout;
        let joined = match tokio::time::timeout(join_timeout, &mut handle).await {
            Ok(joined) => joined,
            Err(source) => {
                handle.abort();
                // Detach the cursor so a late cycle in the aborted task cannot move it
                let position = self.cursor.load(Ordering::SeqCst);
                self.cursor = Arc::new(AtomicUsize::new(position));
                warn!(
                    timeout_ms = u64::try_from(join_timeout.as_millis()).unwrap_or(u64::MAX),
                    position,
                    "Rotation task did not stop in time; aborted"
                );
                return Err(SchedulerError::Timeout { duration: join_timeout, source });
            }
        };

        let rotation = joined.map_err(|err| {
            warn!(
                error = %err,
                position = self.cursor.load(Ordering::SeqCst),
                "Rotation task failed"
            );
            SchedulerError::TaskJoinFailed(err)
        })?;

        info!(position = rotation.position(), "Rotation scheduler stopped");
        self.rotation = Some(rotation);
        log_metric(self.metrics.record_stop(), "scheduler.rotation.stop");
        Ok(())
    }

    /// Drive the rotation on the current task until `cancel` fires.
    ///
    /// Under normal operation this only returns once cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::AlreadyRunning` if a background loop was
    /// started on this scheduler.
    #[instrument(skip_all)]
    pub async fn run_until_cancelled(
        mut self,
        listener: Arc<dyn ResultListener>,
        cancel: CancellationToken,
    ) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let rotation = self.take_rotation()?;
        info!(widgets = ?rotation.widget_names(), "Running rotation in the foreground");
        log_metric(self.metrics.record_start(), "scheduler.rotation.start");
        self.cursor = Arc::new(AtomicUsize::new(rotation.position()));

        let rotation = Self::rotation_loop(
            rotation,
            listener,
            self.config.policy(),
            cancel,
            Arc::clone(&self.cursor),
            Arc::clone(&self.metrics),
        )
        .await;

        info!(position = rotation.position(), "Foreground rotation finished");
        self.rotation = Some(rotation);
        log_metric(self.metrics.record_stop(), "scheduler.rotation.stop");
        Ok(())
    }

    /// Check if the loop task is alive
    pub fn is_running(&self) -> bool {
        self.task_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Cursor position, available while the scheduler is idle
    pub fn position(&self) -> Option<usize> {
        if self.is_running() {
            return None;
        }
        Some(
            self.rotation
                .as_ref()
                .map_or_else(|| self.cursor.load(Ordering::SeqCst), Rotation::position),
        )
    }

    pub fn config(&self) -> &RotationSchedulerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<RotationMetrics> {
        &self.metrics
    }

    /// Take the idle rotation, or rebuild one lost with its loop task
    fn take_rotation(&mut self) -> SchedulerResult<Rotation> {
        if let Some(rotation) = self.rotation.take() {
            return Ok(rotation);
        }

        let position = self.cursor.load(Ordering::SeqCst);
        warn!(position, "Rebuilding rotation lost with its loop task");
        Rotation::starting_at(self.widgets.clone(), position)
            .map_err(|err| SchedulerError::StartFailed(err.to_string()))
    }

    /// Background rotation loop; returns the rotation once cancelled
    async fn rotation_loop(
        mut rotation: Rotation,
        listener: Arc<dyn ResultListener>,
        policy: CadencePolicy,
        cancel: CancellationToken,
        cursor: Arc<AtomicUsize>,
        metrics: Arc<RotationMetrics>,
    ) -> Rotation {
        loop {
            let report = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(position = rotation.position(), "Rotation loop cancelled before cycle");
                    break;
                }
                report = run_cycle(&mut rotation, listener.as_ref(), &policy) => report,
            };
            cursor.store(report.next_position, Ordering::SeqCst);

            log_metric(
                metrics.record_cycle_outcome(report.outcome, report.elapsed),
                "scheduler.rotation.cycle",
            );
            log_metric(metrics.record_delay(report.delay), "scheduler.rotation.delay");

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(position = rotation.position(), "Rotation loop cancelled during delay");
                    break;
                }
                () = tokio::time::sleep(report.delay) => {}
            }
        }

        rotation
    }
}

fn log_metric(result: MetricsResult<()>, metric: &'static str) {
    if let Err(err) = result {
        warn!(metric = metric, error = ?err, "Failed to record scheduler metric");
    }
}

/// Ensure the loop is cancelled when the scheduler is dropped
impl Drop for RotationScheduler {
    fn drop(&mut self) {
        if self.task_handle.is_some() && !self.cancellation_token.is_cancelled() {
            warn!("RotationScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
