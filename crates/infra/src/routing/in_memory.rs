//! In-memory bot registry implementing [`BotLocator`]
//!
//! Bots are kept per room in registration order; the first registered bot
//! that is still available wins.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rotaboard_core::BotLocator;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct BotEntry {
    id: String,
    available: bool,
}

/// Thread-safe bot registry
#[derive(Debug, Default)]
pub struct InMemoryBotLocator {
    rooms: RwLock<HashMap<String, Vec<BotEntry>>>,
}

impl InMemoryBotLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bot_id` in `room` as available.
    ///
    /// Registering a bot that is already in the room only marks it available
    /// and keeps its original position.
    pub fn register(&self, room: &str, bot_id: &str) {
        let mut rooms = self.write();
        let bots = rooms.entry(room.to_string()).or_default();

        match bots.iter_mut().find(|entry| entry.id == bot_id) {
            Some(entry) => entry.available = true,
            None => bots.push(BotEntry { id: bot_id.to_string(), available: true }),
        }
        debug!(room, bot_id, "Registered bot");
    }

    /// Change a bot's availability. Returns false if the bot is unknown.
    pub fn set_available(&self, room: &str, bot_id: &str, available: bool) -> bool {
        let mut rooms = self.write();
        let Some(entry) = rooms
            .get_mut(room)
            .and_then(|bots| bots.iter_mut().find(|entry| entry.id == bot_id))
        else {
            return false;
        };

        entry.available = available;
        debug!(room, bot_id, available, "Updated bot availability");
        true
    }

    /// Remove a bot from a room. Returns false if the bot is unknown.
    pub fn remove(&self, room: &str, bot_id: &str) -> bool {
        let mut rooms = self.write();
        let Some(bots) = rooms.get_mut(room) else {
            return false;
        };

        let before = bots.len();
        bots.retain(|entry| entry.id != bot_id);
        let removed = bots.len() != before;
        if bots.is_empty() {
            rooms.remove(room);
        }
        removed
    }

    /// Number of bots registered in `room`, available or not
    pub fn bot_count(&self, room: &str) -> usize {
        self.read().get(room).map_or(0, Vec::len)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<BotEntry>>> {
        match self.rooms.read() {
            Ok(guard) => guard,
            Err(poison_err) => {
                warn!("Bot registry lock poisoned, recovering");
                poison_err.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<BotEntry>>> {
        match self.rooms.write() {
            Ok(guard) => guard,
            Err(poison_err) => {
                warn!("Bot registry lock poisoned, recovering");
                poison_err.into_inner()
            }
        }
    }
}

impl BotLocator for InMemoryBotLocator {
    fn locate_first_available_bot_in(&self, room: &str) -> Option<String> {
        self.read()
            .get(room)?
            .iter()
            .find(|entry| entry.available)
            .map(|entry| entry.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rotaboard_core::Router;
    use rotaboard_domain::RouteRequest;

    use super::*;

    #[test]
    fn empty_room_has_no_bot() {
        let locator = InMemoryBotLocator::new();
        assert_eq!(locator.locate_first_available_bot_in("London"), None);
    }

    #[test]
    fn first_registered_available_bot_wins() {
        let locator = InMemoryBotLocator::new();
        locator.register("London", "BOT-1");
        locator.register("London", "BOT-2");
        locator.register("Paris", "BOT-3");

        assert_eq!(locator.locate_first_available_bot_in("London").as_deref(), Some("BOT-1"));

        assert!(locator.set_available("London", "BOT-1", false));
        assert_eq!(locator.locate_first_available_bot_in("London").as_deref(), Some("BOT-2"));

        assert!(locator.set_available("London", "BOT-1", true));
        assert_eq!(locator.locate_first_available_bot_in("London").as_deref(), Some("BOT-1"));
    }

    #[test]
    fn re_registering_keeps_position() {
        let locator = InMemoryBotLocator::new();
        locator.register("London", "BOT-1");
        locator.register("London", "BOT-2");
        locator.set_available("London", "BOT-1", false);

        locator.register("London", "BOT-1");
        assert_eq!(locator.bot_count("London"), 2);
        assert_eq!(locator.locate_first_available_bot_in("London").as_deref(), Some("BOT-1"));
    }

    #[test]
    fn unknown_bots_are_reported() {
        let locator = InMemoryBotLocator::new();
        assert!(!locator.set_available("London", "ghost", true));
        assert!(!locator.remove("London", "ghost"));
    }

    #[test]
    fn removing_last_bot_empties_room() {
        let locator = InMemoryBotLocator::new();
        locator.register("London", "BOT-1");

        assert!(locator.remove("London", "BOT-1"));
        assert_eq!(locator.bot_count("London"), 0);
        assert_eq!(locator.locate_first_available_bot_in("London"), None);
    }

    #[test]
    fn router_pairs_human_with_registered_bot() {
        let locator = Arc::new(InMemoryBotLocator::new());
        locator.register("London", "ABCDEFGH123");
        let router = Router::new(locator.clone());

        let mut request = RouteRequest::new("human", "London");
        router.route(&mut request).unwrap();
        assert_eq!(request.room, "ABCDEFGH123");

        locator.set_available("London", "ABCDEFGH123", false);
        let mut request = RouteRequest::new("human", "London");
        assert_eq!(router.route(&mut request).unwrap_err().to_string(), "No bots available");
    }
}
