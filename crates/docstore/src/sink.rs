//! Conflict reporting.

use docstore_core::store::{ConflictEvent, ConflictSink};

/// Reports conflicts as warnings on the `tracing` pipeline.
///
/// Hash mismatches are advisory and never block a write, so the default
/// policy is to log them and move on. Anything fancier (metrics, dead
/// letter queues) plugs in as its own [`ConflictSink`].
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl ConflictSink for LogSink {
    fn conflict_detected(&self, event: &ConflictEvent) {
        tracing::warn!(
            table = %event.table,
            key = %event.key,
            transaction_id = %event.transaction_id,
            expected_hash = %event.expected_hash,
            stored_hash = event.stored_hash.as_deref(),
            "document hash does not match the stored document"
        );
    }
}
