use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;

/// Errors detected while validating table schema definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid identifier in table {table}: {identifier:?}")]
    InvalidIdentifier { table: String, identifier: String },
    #[error("column mapped more than once in table {table}: {column}")]
    DuplicateColumn { table: String, column: String },
    #[error("empty {kind} name in table {table}")]
    EmptyName { table: String, kind: &'static str },
}

/// How documents map onto the rows of one backing table.
///
/// Column names feed straight into SQL text, so only bare identifiers are
/// accepted; request input never reaches an identifier position. The
/// backing table is assumed to already match: in particular the key column
/// must be unique-indexed for upserts to classify correctly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableSchema {
    /// Column holding the document key.
    pub key_column: String,
    /// Column holding the document body.
    pub body_column: String,
    /// Column holding the content hash. Present only for tables with
    /// conflict detection.
    #[serde(default)]
    pub hash_column: Option<String>,
    /// Metadata key to column. Keys match document metadata
    /// case-insensitively.
    #[serde(default)]
    pub metadata_columns: BTreeMap<String, String>,
    /// Write-param name to column, for extra columns populated per write.
    #[serde(default)]
    pub param_columns: BTreeMap<String, String>,
}

impl TableSchema {
    /// Returns true when writes to this table compare content hashes.
    pub fn supports_conflict_detection(&self) -> bool {
        self.hash_column.is_some()
    }

    fn validate(&self, table: &str) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        let mut claim = |column: &str| {
            if !is_identifier(column) {
                return Err(SchemaError::InvalidIdentifier {
                    table: table.to_string(),
                    identifier: column.to_string(),
                });
            }
            if !seen.insert(column.to_string()) {
                return Err(SchemaError::DuplicateColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
            Ok(())
        };

        claim(&self.key_column)?;
        claim(&self.body_column)?;
        if let Some(hash_column) = &self.hash_column {
            claim(hash_column)?;
        }
        for (key, column) in &self.metadata_columns {
            if key.is_empty() {
                return Err(SchemaError::EmptyName {
                    table: table.to_string(),
                    kind: "metadata key",
                });
            }
            claim(column)?;
        }
        for (name, column) in &self.param_columns {
            if name.is_empty() {
                return Err(SchemaError::EmptyName {
                    table: table.to_string(),
                    kind: "write param",
                });
            }
            claim(column)?;
        }
        Ok(())
    }
}

/// Immutable lookup from table name to schema, validated on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// Validates every definition and builds the registry.
    pub fn new(tables: BTreeMap<String, TableSchema>) -> Result<Self, SchemaError> {
        for (table, schema) in &tables {
            if !is_identifier(table) {
                return Err(SchemaError::InvalidIdentifier {
                    table: table.clone(),
                    identifier: table.clone(),
                });
            }
            schema.validate(table)?;
        }
        Ok(Self { tables })
    }

    /// Looks up the schema configured for a table, if any.
    pub fn lookup(&self, table: &str) -> Option<&TableSchema> {
        self.tables.get(table)
    }

    /// Iterates over configured tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableSchema)> {
        self.tables
            .iter()
            .map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
