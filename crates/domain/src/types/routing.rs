//! Request classification types

use serde::{Deserialize, Serialize};

use crate::impl_tag_conversions;

/// Incoming connection request to be classified by the router.
///
/// `client_type` is kept as the raw tag so unrecognised values can be
/// reported back verbatim. `room` is the routing target: for humans it is
/// overwritten with the id of the bot they are paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(rename = "clientType")]
    pub client_type: String,
    pub room: String,
}

impl RouteRequest {
    pub fn new(client_type: impl Into<String>, room: impl Into<String>) -> Self {
        Self { client_type: client_type.into(), room: room.into() }
    }

    /// Parsed client type, or the raw tag when it is not recognised.
    pub fn parsed_client_type(&self) -> Result<ClientType, &str> {
        self.client_type.parse().map_err(|_| self.client_type.as_str())
    }
}

/// Known client kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    Human,
    Bot,
}

impl_tag_conversions!(ClientType {
    Human => "human",
    Bot => "bot",
});
