//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `StoreError` from `docstore_core::store`. Every
//! backend failure surfaces as `Storage`; none of them are the caller's
//! fault, so the taxonomy does not split further. The message keeps
//! enough driver detail to diagnose.

use docstore_core::store::StoreError;

/// Maps a sqlx error to a StoreError.
///
/// Pool and connection failures get a stable prefix so operators can tell
/// them apart from query failures in logs:
///
/// - `PoolTimedOut` / `PoolClosed` -> "connection pool ..."
/// - `Io` -> "connection failed: ..."
/// - `Database` -> "query failed: ..."
/// - everything else -> the driver's own message
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut => StoreError::Storage("connection pool timed out".to_string()),
        sqlx::Error::PoolClosed => StoreError::Storage("connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => StoreError::Storage(format!("connection failed: {io_err}")),
        sqlx::Error::Database(db_err) => StoreError::Storage(format!("query failed: {db_err}")),
        _ => StoreError::Storage(err.to_string()),
    }
}
