//! SQL statement generation for configured tables.
//!
//! Builds the three statements a table needs - point select, existence
//! lookup, and upsert - from its schema, following the Functional Core
//! pattern - pure string building, no I/O.
//!
//! Identifiers come exclusively from the validated registry; request
//! input only ever reaches these statements as `?` bind values.

use docstore_core::store::TableSchema;

/// The statements and bind orders used for one table.
///
/// Bind order for the upsert is: key, write params, body, hash (when the
/// table has one), metadata values. The select returns columns as body,
/// hash (when present), metadata values, matching `metadata_keys` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableStatements {
    pub select: String,
    pub lookup: String,
    pub upsert: String,
    /// Metadata keys in select and upsert bind order.
    pub metadata_keys: Vec<String>,
    /// Write-param names in upsert bind order.
    pub param_names: Vec<String>,
}

impl TableStatements {
    pub fn new(table: &str, schema: &TableSchema) -> Self {
        let metadata_keys: Vec<String> = schema.metadata_columns.keys().cloned().collect();
        let param_names: Vec<String> = schema.param_columns.keys().cloned().collect();

        let mut read_columns = vec![schema.body_column.clone()];
        if let Some(hash_column) = &schema.hash_column {
            read_columns.push(hash_column.clone());
        }
        read_columns.extend(schema.metadata_columns.values().cloned());

        let select = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            read_columns.join(", "),
            table,
            schema.key_column
        );

        let lookup = match &schema.hash_column {
            Some(hash_column) => format!(
                "SELECT {} FROM {} WHERE {} = ?",
                hash_column, table, schema.key_column
            ),
            None => format!("SELECT 1 FROM {} WHERE {} = ?", table, schema.key_column),
        };

        let mut write_columns = vec![schema.key_column.clone()];
        write_columns.extend(schema.param_columns.values().cloned());
        write_columns.push(schema.body_column.clone());
        if let Some(hash_column) = &schema.hash_column {
            write_columns.push(hash_column.clone());
        }
        write_columns.extend(schema.metadata_columns.values().cloned());

        let placeholders = vec!["?"; write_columns.len()].join(", ");
        let assignments: Vec<String> = write_columns[1..]
            .iter()
            .map(|column| format!("{column} = excluded.{column}"))
            .collect();

        let upsert = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) DO UPDATE SET {}",
            table,
            write_columns.join(", "),
            placeholders,
            schema.key_column,
            assignments.join(", ")
        );

        Self {
            select,
            lookup,
            upsert,
            metadata_keys,
            param_names,
        }
    }
}
