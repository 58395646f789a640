//! Engine event sink — an injectable observer instead of a process-wide
//! logger, so tests can assert on emitted events without global state.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default capacity of the bounded ring buffer sink.
pub const DEFAULT_EVENT_CAPACITY: usize = 5000;

/// Structured events emitted by the engine while a run progresses.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A collaborator call failed and a fallback value was used instead.
    Degraded {
        operation: String,
        error: String,
        fallback: String,
    },
    RoundScored {
        round: u32,
        score: f64,
    },
    Terminated {
        reason: String,
    },
}

/// A timestamped event as stored by [`RingBufferObserver`].
#[derive(Debug, Clone, Serialize)]
pub struct RecordedEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: EngineEvent,
}

/// Capability the engine depends on for observability. Implementations must
/// be cheap and non-blocking; the engine calls this inline.
pub trait EngineObserver: Send + Sync {
    fn record(&self, event: EngineEvent);
}

/// Observer that drops everything. Useful as a default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl EngineObserver for NullObserver {
    fn record(&self, _event: EngineEvent) {}
}

/// Bounded in-memory sink. When full, the oldest event is evicted.
pub struct RingBufferObserver {
    capacity: usize,
    events: Mutex<VecDeque<RecordedEvent>>,
}

impl RingBufferObserver {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
        }
    }

    /// Snapshot of the currently retained events, oldest first.
    pub fn snapshot(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RingBufferObserver {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EngineObserver for RingBufferObserver {
    fn record(&self, event: EngineEvent) {
        let Ok(mut events) = self.events.lock() else {
            return;
        };
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(RecordedEvent {
            at: Utc::now(),
            event,
        });
    }
}
