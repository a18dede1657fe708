//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use movies_etl_shared::MovieDocument;

use crate::errors::SearchIndexError;
use crate::types::BulkIndexSummary;

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the loader to enable dependency injection
/// and easy testing with mock implementations.
///
/// # Upserts
///
/// Documents are written under their `id`, so writing a document whose id is
/// already indexed replaces the stored document instead of adding another one.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the target index exists, creating it with the movie mappings if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If the index could not be checked or created
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Write all documents to `index` in a single bulk request.
    ///
    /// Per-document rejections are not errors: they come back in the summary,
    /// and every other document in the request stays indexed.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkIndexSummary)` - One outcome per document, in submission order
    /// * `Err(SearchIndexError)` - If the request itself failed; no document in
    ///   it may be assumed indexed
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[MovieDocument],
    ) -> Result<BulkIndexSummary, SearchIndexError>;
}
