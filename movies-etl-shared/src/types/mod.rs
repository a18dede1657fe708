//! This module defines the core data structures used across the ETL pipeline.
//! It re-exports the source-side rows and the index-side documents.

pub mod movie_document;
pub mod source_row;

pub use movie_document::{MovieDocument, Person};
pub use source_row::{SourceRow, WriterRef, WriterReference};
