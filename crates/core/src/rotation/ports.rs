//! Port interfaces for the widget rotation
//!
//! These traits define the boundaries between the rotation logic and the
//! widgets and consumers plugged into it.

use async_trait::async_trait;
use rotaboard_domain::{Rank, Result, WidgetPayload};

/// A data-producing unit taking part in the rotation
#[async_trait]
pub trait Widget: Send + Sync {
    /// Human-readable identifier, used for logs only
    fn name(&self) -> &str;

    /// Weight applied to the wait before this widget runs
    fn rank(&self) -> Rank;

    /// Produce the widget's current payload
    async fn rule(&self) -> Result<WidgetPayload>;
}

/// Consumer of successful widget payloads
///
/// Called inline by the rotation, so implementations must return quickly.
pub trait ResultListener: Send + Sync {
    fn on_result(&self, payload: WidgetPayload);
}

impl<F> ResultListener for F
where
    F: Fn(WidgetPayload) + Send + Sync,
{
    fn on_result(&self, payload: WidgetPayload) {
        self(payload);
    }
}
