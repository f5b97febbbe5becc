//! Core domain types and contracts for docstore.
//!
//! This crate provides:
//! - Documents: opaque body bytes plus case-insensitive string metadata
//! - Table schemas: validated per-table document-to-row column mappings
//! - The [`store::DocumentStore`] contract storage engines implement
//! - The [`store::StoreError`] taxonomy and its pure HTTP status mapping
//!
//! Everything here is I/O-free; storage engines live in the `docstore`
//! crate.

pub mod document;
pub mod store;
