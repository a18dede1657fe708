//! # Movies ETL Repository
//!
//! This crate provides traits and implementations for the two external systems
//! the ETL talks to: the relational movie database it reads from and the search
//! index it writes to. It includes definitions for errors, interfaces, a SQLite
//! source, and an OpenSearch bulk-write provider.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod sqlite;
pub mod types;

pub use config::OpenSearchConfig;
pub use errors::{SearchIndexError, SourceError};
pub use interfaces::{MovieSource, SearchIndexProvider};
pub use opensearch::OpenSearchProvider;
pub use sqlite::SqliteMovieSource;
pub use types::{BulkIndexSummary, BulkItemOutcome};
