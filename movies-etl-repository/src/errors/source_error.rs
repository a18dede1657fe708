use thiserror::Error;

/// Represents errors that can occur while reading the relational source.
///
/// Any of these means the source cannot be trusted for this run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

impl SourceError {
    /// Create a malformed row error.
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }
}
