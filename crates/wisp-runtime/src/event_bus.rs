//! Event bus feeding the trail engine

use crate::event::TrailEvent;

/// A simple FIFO queue that hosts push to and systems drain
pub struct EventBus {
    events: Vec<TrailEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: TrailEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus in arrival order
    pub fn drain(&mut self) -> Vec<TrailEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
