//! Widget rotation
//!
//! A rotation is a fixed, cyclically indexed list of widgets. Each cycle
//! invokes the current widget, forwards a successful payload to the
//! listener, advances the cursor and computes how long to wait before the
//! next cycle. The waiting itself is left to the caller (see the scheduler in
//! `rotaboard-infra`), which keeps everything here deterministic.

pub mod cycle;
pub mod policy;
pub mod ports;
pub mod state;

pub use cycle::{run_cycle, CycleReport};
pub use policy::CadencePolicy;
pub use state::Rotation;
