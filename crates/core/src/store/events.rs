//! Conflict events and the sink they are delivered through.
//!
//! Conflict detection is advisory: the engine reports that a write
//! overwrote content the caller did not expect, then writes anyway. The
//! sink is injected rather than global so the embedding service decides
//! where events go.

use std::sync::Mutex;

/// Advisory notice that a write overwrote content the caller did not
/// expect to be replacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEvent {
    pub table: String,
    pub key: String,
    /// Transaction id of the writing request.
    pub transaction_id: String,
    /// Hash the caller believed it was replacing.
    pub expected_hash: String,
    /// Hash actually stored at write time, if the row had one.
    pub stored_hash: Option<String>,
}

/// Receives conflict events raised by storage engines.
///
/// Called inline on the write path, so implementations must not block.
pub trait ConflictSink: Send + Sync {
    fn conflict_detected(&self, event: &ConflictEvent);
}

/// Sink that keeps every event in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Mutex<Vec<ConflictEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events received so far, in arrival order.
    pub fn events(&self) -> Vec<ConflictEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConflictSink for InMemorySink {
    fn conflict_detected(&self, event: &ConflictEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> ConflictEvent {
        ConflictEvent {
            table: "draft_annotations".to_string(),
            key: "abc-123".to_string(),
            transaction_id: "tid_test".to_string(),
            expected_hash: "deadbeef".to_string(),
            stored_hash: Some("cafebabe".to_string()),
        }
    }

    #[test]
    fn test_in_memory_sink_collects_events_in_order() {
        let sink = InMemorySink::new();
        let first = sample_event();
        let second = ConflictEvent {
            key: "def-456".to_string(),
            ..sample_event()
        };

        sink.conflict_detected(&first);
        sink.conflict_detected(&second);

        assert_eq!(sink.events(), vec![first, second]);
    }

    #[test]
    fn test_in_memory_sink_starts_empty() {
        let sink = InMemorySink::new();

        assert!(sink.events().is_empty());
    }
}
