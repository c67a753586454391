//! A single rotation cycle: invoke, dispatch, advance, compute the wait

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rotaboard_domain::{CycleOutcome, WidgetPayload};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::policy::CadencePolicy;
use super::ports::ResultListener;
use super::state::Rotation;

/// What happened during one cycle and when the next one is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Name of the widget that was invoked
    pub widget: String,
    /// Cursor position of that widget
    pub position: usize,
    pub outcome: CycleOutcome,
    /// Cursor position after the advance
    pub next_position: usize,
    /// Wait before the next cycle
    pub delay: Duration,
    /// Time spent waiting for the widget
    pub elapsed: Duration,
}

/// Run one cycle against the widget at the cursor.
///
/// The widget call is bounded by `policy.widget_timeout`. A payload is handed
/// to `listener` before the cursor moves; errors, panics and timeouts are
/// logged and never reach it. A panicking widget counts as a failed cycle. The cursor advances by exactly one step whatever the
/// outcome, and the returned delay is computed from the widget that is now
/// current.
pub async fn run_cycle<L>(
    rotation: &mut Rotation,
    listener: &L,
    policy: &CadencePolicy,
) -> CycleReport
where
    L: ResultListener + ?Sized,
{
    let widget = Arc::clone(rotation.current());
    let position = rotation.position();
    let started = Instant::now();

    let call = AssertUnwindSafe(widget.rule()).catch_unwind();
    let outcome = match tokio::time::timeout(policy.widget_timeout, call).await {
        Ok(Ok(Ok(payload))) => {
            deliver(listener, widget.name(), payload);
            CycleOutcome::Delivered
        }
        Ok(Ok(Err(err))) => {
            warn!(widget = widget.name(), position, error = %err, "Widget rule failed");
            CycleOutcome::Failed
        }
        Ok(Err(panic)) => {
            warn!(
                widget = widget.name(),
                position,
                panic = panic_message(panic.as_ref()),
                "Widget rule panicked"
            );
            CycleOutcome::Failed
        }
        Err(_) => {
            warn!(
                widget = widget.name(),
                position,
                timeout_ms = u64::try_from(policy.widget_timeout.as_millis()).unwrap_or(u64::MAX),
                "Widget rule timed out"
            );
            CycleOutcome::TimedOut
        }
    };
    let elapsed = started.elapsed();

    rotation.advance();
    let upcoming = rotation.current();
    let delay = policy.next_delay(outcome, upcoming.rank());

    debug!(
        widget = widget.name(),
        %outcome,
        next_widget = upcoming.name(),
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "Rotation cycle settled"
    );

    CycleReport {
        widget: widget.name().to_string(),
        position,
        outcome,
        next_position: rotation.position(),
        delay,
        elapsed,
    }
}

fn deliver<L>(listener: &L, widget: &str, payload: WidgetPayload)
where
    L: ResultListener + ?Sized,
{
    let delivered = std::panic::catch_unwind(AssertUnwindSafe(|| listener.on_result(payload)));
    if let Err(panic) = delivered {
        warn!(widget, panic = panic_message(panic.as_ref()), "Result listener panicked");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
