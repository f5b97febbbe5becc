//! SQLite storage engine.
//!
//! Implements the `DocumentStore` contract over a shared `SqlitePool`,
//! driving the per-table statements generated from the schema registry.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use docstore_core::document::Document;
use docstore_core::store::{
    ConflictEvent, ConflictSink, DocumentStore, Outcome, RequestContext, Result, SchemaRegistry,
    StoreError, TableSchema, WriteResult,
};

use super::error::map_sqlx_error;
use super::statements::TableStatements;
use crate::sink::LogSink;

/// What the pre-write lookup found at the target key.
enum RowLookup {
    Absent,
    Present { stored_hash: Option<String> },
}

struct StoreTable {
    schema: TableSchema,
    statements: TableStatements,
}

/// SQLite-backed document store.
///
/// Statements are generated once per configured table at construction.
/// The pool is shared; no connection is held between calls and no
/// transaction spans a request - each write is an existence lookup plus
/// one upsert, so a row is always entirely old or entirely new.
pub struct SqliteStore {
    pool: SqlitePool,
    tables: BTreeMap<String, StoreTable>,
    sink: Arc<dyn ConflictSink>,
}

impl SqliteStore {
    /// Creates a store that reports conflicts through [`LogSink`].
    pub fn new(pool: SqlitePool, registry: SchemaRegistry) -> Self {
        Self::with_conflict_sink(pool, registry, Arc::new(LogSink::new()))
    }

    /// Creates a store with a custom conflict sink.
    pub fn with_conflict_sink(
        pool: SqlitePool,
        registry: SchemaRegistry,
        sink: Arc<dyn ConflictSink>,
    ) -> Self {
        let tables = registry
            .iter()
            .map(|(table, schema)| {
                let statements = TableStatements::new(table, schema);
                (
                    table.to_string(),
                    StoreTable {
                        schema: schema.clone(),
                        statements,
                    },
                )
            })
            .collect();

        Self { pool, tables, sink }
    }

    /// Checks backend connectivity, for health endpoints.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    fn table(&self, table: &str) -> Result<&StoreTable> {
        self.tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable {
                table: table.to_string(),
            })
    }

    async fn lookup_row(&self, entry: &StoreTable, key: &str) -> Result<RowLookup> {
        let found = if entry.schema.supports_conflict_detection() {
            sqlx::query_scalar::<_, Option<String>>(&entry.statements.lookup)
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?
                .map(|stored_hash| RowLookup::Present { stored_hash })
        } else {
            sqlx::query_scalar::<_, i64>(&entry.statements.lookup)
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?
                .map(|_| RowLookup::Present { stored_hash: None })
        };
        Ok(found.unwrap_or(RowLookup::Absent))
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn read(&self, _ctx: &RequestContext, table: &str, key: &str) -> Result<Document> {
        let entry = self.table(table)?;

        let row = sqlx::query(&entry.statements.select)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
                key: key.to_string(),
            })?;

        let body: Vec<u8> = row.try_get(0).map_err(map_sqlx_error)?;
        let mut doc = Document::new(body);

        let mut index: usize = 1;
        if entry.schema.supports_conflict_detection() {
            doc.hash = row
                .try_get::<Option<String>, _>(index)
                .map_err(map_sqlx_error)?;
            index += 1;
        }
        for metadata_key in &entry.statements.metadata_keys {
            if let Some(value) = row
                .try_get::<Option<String>, _>(index)
                .map_err(map_sqlx_error)?
            {
                doc.metadata.set(metadata_key, value);
            }
            index += 1;
        }

        tracing::debug!(table, key, "document read");
        Ok(doc)
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
        let entry = self.table(table)?;
        let hash = doc.content_hash(entry.statements.metadata_keys.iter().map(String::as_str));

        let existing = self.lookup_row(entry, key).await?;

        // Advisory only: a mismatch is reported, never rejected.
        if let RowLookup::Present { stored_hash } = &existing {
            if entry.schema.supports_conflict_detection() {
                if let Some(expected) = previous_hash.filter(|h| !h.is_empty()) {
                    if stored_hash.as_deref() != Some(expected) {
                        self.sink.conflict_detected(&ConflictEvent {
                            table: table.to_string(),
                            key: key.to_string(),
                            transaction_id: ctx.transaction_id().to_string(),
                            expected_hash: expected.to_string(),
                            stored_hash: stored_hash.clone(),
                        });
                    }
                }
            }
        }

        let mut query = sqlx::query(&entry.statements.upsert).bind(key);
        for name in &entry.statements.param_names {
            query = query.bind(params.get(name));
        }
        query = query.bind(&doc.body);
        if entry.schema.supports_conflict_detection() {
            query = query.bind(&hash);
        }
        for metadata_key in &entry.statements.metadata_keys {
            query = query.bind(doc.metadata.get(metadata_key));
        }

        query.execute(&self.pool).await.map_err(map_sqlx_error)?;

        let outcome = match existing {
            RowLookup::Absent => Outcome::Created,
            RowLookup::Present { .. } => Outcome::Updated,
        };

        tracing::debug!(table, key, outcome = %outcome, "document written");
        Ok(WriteResult { outcome, hash })
    }
}
