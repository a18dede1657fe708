//! Search index error types.
//!
//! This module defines the unified error type for all search index operations.
//! Per-document rejections inside a bulk response are not errors at this level;
//! they are reported in [`BulkIndexSummary`](crate::types::BulkIndexSummary).

use thiserror::Error;

/// Unified errors from search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Invalid configuration or request (e.g., bad URL, empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to build the client transport.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be completed: network error, timeout, or non-2xx status.
    ///
    /// Nothing sent in the failed request may be assumed indexed.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse response from search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport failure.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportFailure(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Whether the error came from the transport and the request may be resent.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

impl From<serde_json::Error> for SearchIndexError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
