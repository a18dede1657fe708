//! Interface definitions for the ETL's external collaborators.
//!
//! The traits allow swapping the relational source and the search backend,
//! and testing the pipeline with mock implementations.

mod movie_source;
mod search_index_provider;

pub use movie_source::MovieSource;
pub use search_index_provider::SearchIndexProvider;
