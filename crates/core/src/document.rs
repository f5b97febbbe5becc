//! Documents as the store sees them: opaque bytes plus string metadata.

use std::collections::BTreeMap;

use sha2::{Digest, Sha224};

/// String metadata attached to a document.
///
/// Keys are normalized to ASCII lowercase on insert and lookup. Callers
/// usually derive them from transport headers, which are case-insensitive,
/// so the map must not distinguish `X-Origin-System-Id` from
/// `x-origin-system-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    /// Creates an empty metadata map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a metadata value, lowercasing the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into().to_ascii_lowercase(), value.into());
    }

    /// Gets a metadata value by case-insensitive key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Removes a metadata value by case-insensitive key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(&key.to_ascii_lowercase())
    }

    /// Iterates over entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.set(key, value);
        }
        metadata
    }
}

/// An opaque document: body bytes plus metadata.
///
/// The store never interprets the body. `hash` belongs to the engine:
/// writes compute it, reads surface the stored value for tables that
/// persist one. It is never taken from the caller, except as the advisory
/// write precondition passed alongside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub body: Vec<u8>,
    pub metadata: Metadata,
    pub hash: Option<String>,
}

impl Document {
    /// Creates a document with the given body and no metadata.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            metadata: Metadata::new(),
            hash: None,
        }
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.set(key, value);
        self
    }

    /// Content fingerprint: SHA-224 over the body, then each persisted
    /// metadata pair as `key=value;` with the key lowercased, in the order
    /// the keys are given.
    ///
    /// Only pairs the document actually carries contribute; metadata
    /// outside `persisted_keys` never affects the fingerprint. Two
    /// documents that persist identically therefore hash identically.
    pub fn content_hash<'a, I>(&self, persisted_keys: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hasher = Sha224::new();
        hasher.update(&self.body);
        for key in persisted_keys {
            let key = key.to_ascii_lowercase();
            if let Some(value) = self.metadata.get(&key) {
                hasher.update(key.as_bytes());
                hasher.update(b"=");
                hasher.update(value.as_bytes());
                hasher.update(b";");
            }
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_keys_are_case_insensitive() {
        let mut metadata = Metadata::new();
        metadata.set("X-Origin-System-Id", "methode");

        assert_eq!(metadata.get("x-origin-system-id"), Some("methode"));
        assert_eq!(metadata.get("X-ORIGIN-SYSTEM-ID"), Some("methode"));
    }

    #[test]
    fn test_metadata_get_missing_returns_none() {
        let metadata = Metadata::new();

        assert_eq!(metadata.get("_timestamp"), None);
    }

    #[test]
    fn test_metadata_set_overwrites_regardless_of_case() {
        let mut metadata = Metadata::new();
        metadata.set("_timestamp", "2024-01-01T00:00:00Z");
        metadata.set("_TIMESTAMP", "2024-06-15T12:30:00Z");

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("_timestamp"), Some("2024-06-15T12:30:00Z"));
    }

    #[test]
    fn test_metadata_iterates_in_sorted_key_order() {
        let metadata =
            Metadata::from_iter([("publish-ref", "tid_1"), ("_timestamp", "t"), ("origin", "o")]);

        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["_timestamp", "origin", "publish-ref"]);
    }

    #[test]
    fn test_content_hash_is_deterministic() {
        let first = Document::new(r#"{"foo":"bar"}"#).with_metadata("_timestamp", "t1");
        let second = Document::new(r#"{"foo":"bar"}"#).with_metadata("_timestamp", "t1");

        assert_eq!(
            first.content_hash(["_timestamp"]),
            second.content_hash(["_timestamp"])
        );
    }

    #[test]
    fn test_content_hash_is_hex_sha224() {
        let hash = Document::new("body").content_hash([]);

        assert_eq!(hash.len(), 56);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_hash_changes_with_body() {
        let first = Document::new(r#"{"foo":"a"}"#);
        let second = Document::new(r#"{"foo":"b"}"#);

        assert_ne!(first.content_hash([]), second.content_hash([]));
    }

    #[test]
    fn test_content_hash_changes_with_persisted_metadata() {
        let first = Document::new("body").with_metadata("_timestamp", "t1");
        let second = Document::new("body").with_metadata("_timestamp", "t2");

        assert_ne!(
            first.content_hash(["_timestamp"]),
            second.content_hash(["_timestamp"])
        );
    }

    #[test]
    fn test_content_hash_ignores_unpersisted_metadata() {
        let plain = Document::new("body").with_metadata("_timestamp", "t1");
        let extra = Document::new("body")
            .with_metadata("_timestamp", "t1")
            .with_metadata("x-debug", "true");

        assert_eq!(
            plain.content_hash(["_timestamp"]),
            extra.content_hash(["_timestamp"])
        );
    }

    #[test]
    fn test_content_hash_is_insensitive_to_persisted_key_case() {
        let doc = Document::new("body").with_metadata("x-origin-system-id", "methode");

        assert_eq!(
            doc.content_hash(["X-Origin-System-Id"]),
            doc.content_hash(["x-origin-system-id"])
        );
    }

    #[test]
    fn test_content_hash_skips_absent_persisted_keys() {
        let doc = Document::new("body");

        assert_eq!(doc.content_hash(["_timestamp"]), doc.content_hash([]));
    }
}
