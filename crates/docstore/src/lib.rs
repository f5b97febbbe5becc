//! SQLite-backed document store.
//!
//! Wires the `docstore_core` contracts to a concrete engine:
//!
//! - [`SqliteStore`] persists documents through a shared `sqlx` pool,
//!   one configured table per document collection.
//! - [`TimedStore`] bounds every operation with a deadline.
//! - [`StoreConfig`] loads table-schema definitions from YAML.
//! - [`LogSink`] is the default advisory-conflict policy.

pub mod config;
pub mod sink;
pub mod storage;

pub use config::{ConfigError, StoreConfig};
pub use sink::LogSink;
pub use storage::{SqliteStore, TimedStore};
