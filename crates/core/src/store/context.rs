//! Request-scoped context passed through store operations.

use uuid::Uuid;

/// Request-scoped context available to every store operation.
///
/// Carries the transaction id that correlates conflict events and logs
/// with the originating request. The store treats it as opaque and never
/// persists it on its own; callers who want it in a column route it
/// through document metadata or write params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    transaction_id: String,
}

impl RequestContext {
    /// Wraps a transaction id supplied by the transport.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }

    /// Generates a fresh `tid_`-prefixed transaction id, for requests that
    /// arrived without one.
    pub fn with_generated_id() -> Self {
        Self {
            transaction_id: format!("tid_{}", Uuid::new_v4().simple()),
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_supplied_transaction_id() {
        let ctx = RequestContext::new("tid_from_header");

        assert_eq!(ctx.transaction_id(), "tid_from_header");
    }

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let first = RequestContext::with_generated_id();
        let second = RequestContext::with_generated_id();

        assert!(first.transaction_id().starts_with("tid_"));
        assert_ne!(first.transaction_id(), second.transaction_id());
    }
}
