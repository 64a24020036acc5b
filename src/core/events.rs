//! Event output.
//!
//! The engine reports noteworthy captures as plain strings through an
//! `EventSink`. `EventLog` is the bounded buffer a session keeps for display.

use im::Vector;

/// Append-only receiver of event messages.
pub trait EventSink {
    /// Record one message.
    fn push(&mut self, message: String);
}

impl EventSink for Vec<String> {
    fn push(&mut self, message: String) {
        Vec::push(self, message);
    }
}

/// Default number of messages an `EventLog` keeps.
pub const DEFAULT_EVENT_CAPACITY: usize = 20;

/// Bounded FIFO of event messages; the oldest message is dropped first.
#[derive(Clone, Debug)]
pub struct EventLog {
    capacity: usize,
    events: Vector<String>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventLog {
    /// Create a log holding at most `capacity` messages.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Event log capacity must be positive");
        Self {
            capacity,
            events: Vector::new(),
        }
    }

    /// Add several messages in order.
    pub fn extend(&mut self, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            EventSink::push(self, message);
        }
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Current messages, oldest first.
    #[must_use]
    pub fn latest(&self) -> Vec<String> {
        self.events.iter().cloned().collect()
    }

    /// Whether a message is currently buffered.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.events.iter().any(|e| e == message)
    }

    /// Number of buffered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventLog {
    fn push(&mut self, message: String) {
        self.events.push_back(message);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }
}
