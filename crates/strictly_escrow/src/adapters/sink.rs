//! Event sink implementations.

use tracing::{info, warn};

use crate::events::GameEvent;
use crate::ports::EventSink;

/// Keeps every event in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Writes each event to the tracing log as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: GameEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(
                kind = %event.kind(),
                game_id = event.game_id(),
                payload = %payload,
                "Game event"
            ),
            Err(e) => warn!(kind = %event.kind(), error = %e, "Failed to encode game event"),
        }
    }
}
