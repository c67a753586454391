//! Router service - request classification logic

use std::sync::Arc;

use rotaboard_domain::{ClientType, RotaboardError, RouteRequest};
use thiserror::Error;
use tracing::debug;

use super::ports::BotLocator;

/// Reasons a request cannot be routed.
///
/// The messages are part of the client contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("No bots available")]
    NoBotsAvailable,

    #[error("Unrecognised clientType: {0}")]
    UnrecognisedClientType(String),
}

impl From<RoutingError> for RotaboardError {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::NoBotsAvailable => Self::NotFound(err.to_string()),
            RoutingError::UnrecognisedClientType(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

/// Stateless request router
pub struct Router {
    locator: Arc<dyn BotLocator>,
}

impl Router {
    pub fn new(locator: Arc<dyn BotLocator>) -> Self {
        Self { locator }
    }

    /// Classify `request`, rewriting its room for human clients.
    ///
    /// - `human`: the room is replaced by the first available bot in it.
    /// - `bot`: passed through untouched.
    /// - anything else is rejected.
    ///
    /// # Errors
    /// `RoutingError::NoBotsAvailable` when no bot can take a human client,
    /// `RoutingError::UnrecognisedClientType` for unknown client types.
    pub fn route(&self, request: &mut RouteRequest) -> Result<(), RoutingError> {
        let client_type = request
            .parsed_client_type()
            .map_err(|tag| RoutingError::UnrecognisedClientType(tag.to_string()))?;

        match client_type {
            ClientType::Human => {
                let bot_id = self
                    .locator
                    .locate_first_available_bot_in(&request.room)
                    .ok_or(RoutingError::NoBotsAvailable)?;
                debug!(room = %request.room, bot_id = %bot_id, "Paired human client with bot");
                request.room = bot_id;
                Ok(())
            }
            ClientType::Bot => Ok(()),
        }
    }
}
