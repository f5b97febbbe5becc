//! Storage engines and decorators.

pub mod sqlite;
pub mod timed;

pub use sqlite::SqliteStore;
pub use timed::TimedStore;
