//! SQLite storage engine.

mod error;
mod statements;
mod store;

pub use store::SqliteStore;
