use thiserror::Error;

/// The store operation that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Write => write!(f, "write"),
        }
    }
}

/// Errors surfaced by document store operations.
///
/// The four conditions stay distinguishable all the way to the transport:
/// a missing table is the caller's mistake, a missing document is not, a
/// deadline is neither, and everything the backend reports keeps its
/// message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("table not configured: {table}")]
    UnknownTable { table: String },
    #[error("no document found: {table}/{key}")]
    NotFound { table: String, key: String },
    #[error("document {operation} request timed out")]
    Timeout { operation: Operation },
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
