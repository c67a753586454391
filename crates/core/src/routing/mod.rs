//! Request routing
//!
//! Classifies incoming connection requests by client type and pairs human
//! clients with an available bot.

pub mod ports;
pub mod service;

pub use service::{Router, RoutingError};
