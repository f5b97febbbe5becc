//! Deadline enforcement for store operations.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use docstore_core::document::Document;
use docstore_core::store::{
    DocumentStore, Operation, RequestContext, Result, StoreError, WriteResult,
};

/// Wraps a store so every operation resolves within a fixed deadline.
///
/// On expiry the caller gets [`StoreError::Timeout`] and the inner future
/// is dropped, which cancels it. Any pool connection the operation held is
/// released on drop, so a burst of expired requests leaves the pool at its
/// previous capacity.
pub struct TimedStore<S> {
    inner: S,
    deadline: Duration,
}

impl<S> TimedStore<S> {
    pub fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for TimedStore<S> {
    async fn read(&self, ctx: &RequestContext, table: &str, key: &str) -> Result<Document> {
        match timeout(self.deadline, self.inner.read(ctx, table, key)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(table, key, "document read timed out");
                Err(StoreError::Timeout {
                    operation: Operation::Read,
                })
            }
        }
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        table: &str,
        key: &str,
        doc: &Document,
        params: &HashMap<String, String>,
        previous_hash: Option<&str>,
    ) -> Result<WriteResult> {
        match timeout(
            self.deadline,
            self.inner.write(ctx, table, key, doc, params, previous_hash),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(table, key, "document write timed out");
                Err(StoreError::Timeout {
                    operation: Operation::Write,
                })
            }
        }
    }
}
