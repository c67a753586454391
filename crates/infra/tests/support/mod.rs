//! Shared helpers for `rotaboard-infra` integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use rotaboard_core::{ResultListener, Widget};
use rotaboard_domain::{Rank, Result, RotaboardError, WidgetPayload};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// How a [`TimedWidget`] answers every call.
#[derive(Debug, Clone, Copy)]
pub enum Answer {
    Ok,
    Fail,
    Hang,
    Panic,
}

/// Widget reporting each invocation (name and paused-clock instant).
pub struct TimedWidget {
    name: &'static str,
    rank: Rank,
    answer: Answer,
    calls: mpsc::UnboundedSender<(&'static str, Instant)>,
}

impl TimedWidget {
    pub fn new(
        name: &'static str,
        rank: f64,
        answer: Answer,
        calls: &mpsc::UnboundedSender<(&'static str, Instant)>,
    ) -> Arc<dyn Widget> {
        Arc::new(Self { name, rank: Rank::new(rank).unwrap(), answer, calls: calls.clone() })
    }
}

#[async_trait]
impl Widget for TimedWidget {
    fn name(&self) -> &str {
        self.name
    }

    fn rank(&self) -> Rank {
        self.rank
    }

    async fn rule(&self) -> Result<WidgetPayload> {
        let _ = self.calls.send((self.name, Instant::now()));
        match self.answer {
            Answer::Ok => Ok(json!({ "widget": self.name })),
            Answer::Fail => Err(RotaboardError::Widget(format!("{} is down", self.name))),
            Answer::Hang => std::future::pending().await,
            Answer::Panic => panic!("{} exploded", self.name),
        }
    }
}

/// Listener forwarding payloads into a channel.
pub fn channel_listener() -> (Arc<dyn ResultListener>, mpsc::UnboundedReceiver<WidgetPayload>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let listener = move |payload: WidgetPayload| {
        let _ = tx.send(payload);
    };
    (Arc::new(listener), rx)
}
