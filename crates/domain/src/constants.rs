//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Rotation cadence
pub const DEFAULT_BASE_INTERVAL_MS: u64 = 30_000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;
pub const DEFAULT_WIDGET_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_JOIN_TIMEOUT_MS: u64 = 5_000;
