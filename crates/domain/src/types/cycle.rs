//! Rotation cycle types

use serde::{Deserialize, Serialize};

use crate::impl_tag_conversions;

/// Opaque result produced by a widget and forwarded verbatim to the listener.
///
/// Widgets produce differently shaped results, so the payload is plain JSON.
/// Correlating a payload with the widget that produced it is up to the
/// widget (for example by embedding its name).
pub type WidgetPayload = serde_json::Value;

/// How a single rotation cycle settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    /// The widget produced a payload and it was handed to the listener.
    Delivered,
    /// The widget returned an error.
    Failed,
    /// The widget did not settle within the configured timeout.
    TimedOut,
}

impl_tag_conversions!(CycleOutcome {
    Delivered => "delivered",
    Failed => "failed",
    TimedOut => "timed_out",
});
