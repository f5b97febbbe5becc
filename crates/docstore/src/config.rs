//! Table-schema configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use docstore_core::store::{SchemaError, SchemaRegistry, TableSchema};

/// Errors raised while loading a store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Table-schema definitions, one entry per exposed table.
///
/// ```yaml
/// tables:
///   draft_content:
///     key_column: uuid
///     body_column: body
///     hash_column: hash
///     metadata_columns:
///       _timestamp: last_modified
///     param_columns:
///       site: site
/// ```
///
/// `hash_column`, `metadata_columns` and `param_columns` are optional;
/// leaving them out gives a table that stores bare bodies and skips
/// conflict detection.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub tables: BTreeMap<String, TableSchema>,
}

impl StoreConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Validates the definitions into a registry the store can use.
    pub fn into_registry(self) -> Result<SchemaRegistry, ConfigError> {
        Ok(SchemaRegistry::new(self.tables)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_CONFIG: &str = r#"
tables:
  published_annotations:
    key_column: uuid
    body_column: body
    metadata_columns:
      _timestamp: last_modified
      x-request-id: publish_ref
  draft_annotations:
    key_column: uuid
    body_column: body
    hash_column: hash
    metadata_columns:
      _timestamp: last_modified
      x-request-id: publish_ref
  draft_content:
    key_column: uuid
    body_column: body
    hash_column: hash
    metadata_columns:
      _timestamp: last_modified
      x-origin-system-id: origin_system
    param_columns:
      site: site
"#;

    #[test]
    fn test_parses_table_definitions() {
        let config = StoreConfig::from_yaml(FULL_CONFIG).unwrap();
        let registry = config.into_registry().unwrap();

        assert_eq!(registry.len(), 3);

        let published = registry.lookup("published_annotations").unwrap();
        assert!(!published.supports_conflict_detection());
        assert_eq!(
            published.metadata_columns.get("_timestamp"),
            Some(&"last_modified".to_string())
        );

        let content = registry.lookup("draft_content").unwrap();
        assert!(content.supports_conflict_detection());
        assert_eq!(
            content.param_columns.get("site"),
            Some(&"site".to_string())
        );
    }

    #[test]
    fn test_missing_optional_sections_default_to_empty() {
        let config = StoreConfig::from_yaml(
            "tables:\n  documents:\n    key_column: uuid\n    body_column: body\n",
        )
        .unwrap();

        let schema = &config.tables["documents"];
        assert_eq!(schema.hash_column, None);
        assert!(schema.metadata_columns.is_empty());
        assert!(schema.param_columns.is_empty());
    }

    #[test]
    fn test_invalid_column_identifier_is_rejected() {
        let config = StoreConfig::from_yaml(
            "tables:\n  documents:\n    key_column: uuid\n    body_column: \"body; drop\"\n",
        )
        .unwrap();

        let result = config.into_registry();

        assert!(matches!(
            result,
            Err(ConfigError::Schema(SchemaError::InvalidIdentifier { .. }))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let result = StoreConfig::from_yaml("tables: [");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_path_reads_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = StoreConfig::from_path(file.path()).unwrap();

        assert_eq!(config.tables.len(), 3);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = StoreConfig::from_path("/does/not/exist.yml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
