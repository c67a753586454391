//! Port interfaces for request routing

/// Lookup of bots that can accept a new human client
pub trait BotLocator: Send + Sync {
    /// Id of the first available bot in `room`, if any
    fn locate_first_available_bot_in(&self, room: &str) -> Option<String>;
}
