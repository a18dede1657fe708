//! Error types for the movies ETL.

use thiserror::Error;

/// Reasons a single source row cannot be turned into a document.
///
/// These are per-row: the pipeline records them and moves on to the next row
/// unless configured to abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Rating is neither a number nor the unknown marker.
    #[error("movie {id}: malformed rating {value:?}")]
    MalformedRating { id: String, value: String },

    /// A writer id referenced by the movie is not in the writer directory.
    #[error("movie {id}: writer {writer_id} not found in writer directory")]
    UnresolvedWriterReference { id: String, writer_id: String },

    /// Actor id and name lists split into different lengths.
    #[error("movie {id}: {ids} actor ids but {names} actor names")]
    MalformedActorList { id: String, ids: usize, names: usize },

    /// Writers field is not a JSON array of `{"id": ...}` objects.
    #[error("movie {id}: malformed writers list: {reason}")]
    MalformedWriterList { id: String, reason: String },
}

impl TransformError {
    /// Id of the row that failed.
    pub fn row_id(&self) -> &str {
        match self {
            Self::MalformedRating { id, .. }
            | Self::UnresolvedWriterReference { id, .. }
            | Self::MalformedActorList { id, .. }
            | Self::MalformedWriterList { id, .. } => id,
        }
    }
}

/// Errors that can occur in the movies ETL run.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The relational source could not be read. Nothing has been loaded.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A bulk request could not be completed after all retries.
    ///
    /// Documents from the failed request are not indexed; documents from
    /// earlier requests of the same run (`indexed_before`) are.
    #[error("Transport failure after {attempts} attempt(s), {indexed_before} document(s) indexed before: {reason}")]
    TransportFailure {
        attempts: u32,
        indexed_before: usize,
        reason: String,
    },

    /// A row failed to transform and the run is configured to abort on row errors.
    #[error("Row rejected: {0}")]
    RowRejected(#[from] TransformError),

    /// The target index could not be prepared.
    #[error("Index error: {0}")]
    IndexError(String),
}

impl IngestError {
    /// Create a source unavailable error.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }
}

impl From<movies_etl_repository::SourceError> for IngestError {
    fn from(err: movies_etl_repository::SourceError) -> Self {
        Self::SourceUnavailable(err.to_string())
    }
}
