//! Pure functions for mapping store errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`StoreError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// This is a pure function that returns the appropriate HTTP status code
/// for each error variant:
///
/// - `UnknownTable` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Timeout` -> 504 (Gateway Timeout)
/// - `Storage` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use docstore_core::store::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::NotFound {
///     table: "draft_annotations".to_string(),
///     key: "abc-123".to_string(),
/// };
/// assert_eq!(store_error_to_status_code(&error), 404);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::UnknownTable { .. } => 400,
        StoreError::NotFound { .. } => 404,
        StoreError::Timeout { .. } => 504,
        StoreError::Storage(_) => 500,
    }
}
