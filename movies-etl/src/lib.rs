//! # Movies ETL
//!
//! Denormalizes the relational movie database (movies, actors, writers,
//! directors) into flat documents and bulk loads them into the OpenSearch
//! index read by the movies search API.
//!
//! ## Architecture
//!
//! Every run is a full reload of the target index:
//!
//! 1. **Directory**: Loads the full writer lookup once
//! 2. **Processor**: Transforms each joined movie row into a document
//! 3. **Loader**: Writes all documents with bulk requests
//! 4. **Orchestrator**: Runs the three in order and reports the outcome
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`directory`]: Writer lookup for the run
//! - [`processor`]: Row transformation and the row-error policy
//! - [`loader`]: Bulk loading into the search index
//! - [`orchestrator`]: Coordinates the run
//! - [`errors`]: Error types for the ETL

pub mod config;
pub mod directory;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use config::{Dependencies, EtlConfig};
pub use errors::{IngestError, TransformError};
pub use orchestrator::{Pipeline, RunReport};

use thiserror::Error;

/// Errors that can occur during ETL initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
