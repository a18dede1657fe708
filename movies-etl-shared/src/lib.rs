//! # Movies ETL Shared
//!
//! This crate defines the data structures shared across the movies ETL pipeline:
//! the relational rows read from the source, the writer lookup entries, and the
//! denormalized documents stored in the search index.

pub mod sentinel;
pub mod types;

pub use sentinel::{known, UNKNOWN_MARKER};
pub use types::movie_document::{MovieDocument, Person};
pub use types::source_row::{SourceRow, WriterRef, WriterReference};
