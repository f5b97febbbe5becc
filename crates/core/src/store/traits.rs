use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::Document;

use super::{RequestContext, Result};

/// Whether a write landed a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Created => write!(f, "created"),
            Outcome::Updated => write!(f, "updated"),
        }
    }
}

/// What a successful write reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    pub outcome: Outcome,
    /// Content hash of the document as written.
    pub hash: String,
}

/// Keyed document storage over configured tables.
///
/// Engines resolve `table` through the schema registry; a table the
/// registry does not know yields `StoreError::UnknownTable` before the
/// backend is ever contacted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the document stored under `key` in `table`.
    async fn read(&self, ctx: &RequestContext, table: &str, key: &str) -> Result<Document>;

    /// Writes `doc` under `key` in `table`, creating or replacing the row.
    ///
    /// `params` feeds the table's declared write-param columns; undeclared
    /// entries are ignored and missing declared ones persist as NULL. A
    /// non-empty `previous_hash` that differs from the stored hash on a
    /// conflict-detecting table raises one conflict event, and the write
    /// proceeds regardless.
    async fn write(
        &self,
        ctx: &RequestContext,
        table: &str,
        key: &str,
        doc: &Document,
        params: &HashMap<String, String>,
        previous_hash: Option<&str>,
    ) -> Result<WriteResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Created.to_string(), "created");
        assert_eq!(Outcome::Updated.to_string(), "updated");
    }
}
