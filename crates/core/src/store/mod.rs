mod context;
mod error;
mod events;
mod http_mapping;
mod schema;
mod traits;

pub use context::RequestContext;
pub use error::{Operation, Result, StoreError};
pub use events::{ConflictEvent, ConflictSink, InMemorySink};
pub use http_mapping::store_error_to_status_code;
pub use schema::{SchemaError, SchemaRegistry, TableSchema};
pub use traits::{DocumentStore, Outcome, WriteResult};
