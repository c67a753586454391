//! Domain types and models

pub mod cycle;
pub mod rank;
pub mod routing;

pub use cycle::{CycleOutcome, WidgetPayload};
pub use rank::Rank;
pub use routing::{ClientType, RouteRequest};
