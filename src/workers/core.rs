//! Core worker utilities

use crate::events::{Event, EventType, Pipeline};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        // The receiver only goes away when the session is shutting down.
        let _ = self.sender.send(event).await;
    }

    pub async fn send_pipeline_event(
        &self,
        pipeline: Pipeline,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::notice(pipeline, message, event_type, log_level))
            .await;
    }
}
