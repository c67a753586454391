//! Shared test helpers for `rotaboard-core` integration tests.
//!
//! Scripted widgets and a recording listener that write into one shared
//! event log, so tests can assert on the exact interleaving of invocations
//! and deliveries.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rotaboard_core::{BotLocator, ResultListener, Widget};
use rotaboard_domain::{Rank, Result, RotaboardError, WidgetPayload};
use serde_json::json;

/// Something observable that happened during a rotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Invoked(String),
    Delivered(WidgetPayload),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Widget that replays a script of successes (`true`) and failures
/// (`false`), repeating the last entry once the script runs out.
pub struct ScriptedWidget {
    name: String,
    rank: Rank,
    script: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
    log: EventLog,
}

impl ScriptedWidget {
    pub fn new(name: &str, rank: f64, script: &[bool], log: &EventLog) -> Arc<dyn Widget> {
        Arc::new(Self {
            name: name.to_string(),
            rank: Rank::new(rank).expect("test rank must be valid"),
            script: Mutex::new(script.iter().copied().collect()),
            last: Mutex::new(true),
            log: Arc::clone(log),
        })
    }
}

#[async_trait]
impl Widget for ScriptedWidget {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> Rank {
        self.rank
    }

    async fn rule(&self) -> Result<WidgetPayload> {
        self.log.lock().unwrap().push(Event::Invoked(self.name.clone()));

        let succeed = match self.script.lock().unwrap().pop_front() {
            Some(next) => {
                *self.last.lock().unwrap() = next;
                next
            }
            None => *self.last.lock().unwrap(),
        };

        if succeed {
            Ok(json!({ "widget": self.name }))
        } else {
            Err(RotaboardError::Widget(format!("{} failed", self.name)))
        }
    }
}

/// Listener appending every payload to the shared log.
pub struct RecordingListener {
    log: EventLog,
}

impl RecordingListener {
    pub fn new(log: &EventLog) -> Self {
        Self { log: Arc::clone(log) }
    }
}

impl ResultListener for RecordingListener {
    fn on_result(&self, payload: WidgetPayload) {
        self.log.lock().unwrap().push(Event::Delivered(payload));
    }
}

/// Locator returning a fixed answer for every room.
pub struct StubLocator(pub Option<&'static str>);

impl BotLocator for StubLocator {
    fn locate_first_available_bot_in(&self, _room: &str) -> Option<String> {
        self.0.map(str::to_string)
    }
}
