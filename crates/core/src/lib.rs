//! # Rotaboard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for widgets, listeners and bot lookup
//! - The rotation state and its cadence policy
//! - A single rotation cycle and the request router
//!
//! ## Architecture Principles
//! - Only depends on `rotaboard-domain`
//! - No HTTP, file or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod rotation;
pub mod routing;

// Re-export specific items to avoid ambiguity
pub use rotation::ports::{ResultListener, Widget};
pub use rotation::{run_cycle, CadencePolicy, CycleReport, Rotation};
pub use routing::ports::BotLocator;
pub use routing::{Router, RoutingError};
