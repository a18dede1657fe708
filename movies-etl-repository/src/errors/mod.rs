//! Error types for the movies ETL repository.
//!
//! One error type per collaborator: the relational source and the search index.

mod search_index_error;
mod source_error;

pub use search_index_error::SearchIndexError;
pub use source_error::SourceError;
