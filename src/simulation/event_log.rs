//! Bounded history of spawns and meals, newest entry first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entries kept by [`EventLog::default`].
pub const DEFAULT_CAPACITY: usize = 20;

/// One entry of the flock history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Flock time of the event.
    pub time: f32,
    /// Readable summary, e.g. `boid 3 ate boid 7 (mass 20.0)`.
    pub description: String,
    /// Spawn or meal.
    pub kind: EventKind,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A boid joined the flock.
    Spawn,
    /// A boid ate another one.
    Predation,
}

/// Ring of the most recent flock events.
///
/// Once `capacity` entries are held, recording a new one evicts the oldest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// An empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Records `description` at `time`, evicting the oldest entries past capacity.
    pub fn log(&mut self, time: f32, description: impl Into<String>, kind: EventKind) {
        self.entries.push_front(LoggedEvent {
            time,
            description: description.into(),
            kind,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.entries
    }

    /// Upper bound on retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
