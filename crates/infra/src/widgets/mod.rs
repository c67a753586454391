//! Widget adapters
//!
//! Concrete [`rotaboard_core::Widget`] implementations backed by I/O.

pub mod http_json;

pub use http_json::{build_http_widgets, widgets_with_client, HttpJsonWidget};
