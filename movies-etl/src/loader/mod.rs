//! Loader module for the movies ETL.
//!
//! Writes transformed documents into the search index with bulk requests and
//! reconciles the per-document outcomes into a [`LoadReport`].

use std::sync::Arc;
use std::time::Duration;

use movies_etl_repository::{BulkIndexSummary, SearchIndexProvider};
use movies_etl_shared::MovieDocument;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::IngestError;

/// Configuration for the bulk loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum documents per bulk request. `None` sends the whole run in one request.
    pub batch_size: Option<usize>,
    /// How many times a request is resent after a transport failure.
    pub max_retries: u32,
    /// Delay before the first resend; doubled for each further attempt.
    pub retry_backoff: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: None,
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// A document the index rejected although the request itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLoadFailure {
    pub id: String,
    pub reason: String,
}

/// Outcome of loading one document set.
///
/// `attempted == succeeded + failures.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<DocumentLoadFailure>,
}

impl LoadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn record(&mut self, summary: &BulkIndexSummary) {
        self.attempted += summary.total();
        self.succeeded += summary.succeeded();
        self.failures.extend(summary.failures().map(|item| DocumentLoadFailure {
            id: item.id.clone(),
            reason: item.error.clone().unwrap_or_default(),
        }));
    }
}

/// Loader that writes documents into the search engine.
///
/// The loader is responsible for:
/// - Splitting the document set into bulk requests (one by default)
/// - Resending a request that failed in transport, with bounded backoff
/// - Collecting per-document rejections without failing the load
pub struct BulkLoader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl BulkLoader {
    /// Create a new bulk loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(provider, LoaderConfig::default())
    }

    /// Create a new bulk loader with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self { provider, config }
    }

    /// Make sure the target collection exists before loading into it.
    pub async fn prepare(&self, target_collection: &str) -> Result<(), IngestError> {
        self.provider
            .ensure_index_exists(target_collection)
            .await
            .map_err(|e| IngestError::index(format!("Failed to prepare {}: {}", target_collection, e)))
    }

    /// Load `documents` into `target_collection`.
    ///
    /// Each document is written under its own id, so loading the same set
    /// twice leaves one document per id.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadReport)` - Every request completed; rejected documents are
    ///   listed in the report and all others are indexed
    /// * `Err(IngestError::TransportFailure)` - A request could not be
    ///   completed; none of its documents may be assumed indexed
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(
        &self,
        documents: &[MovieDocument],
        target_collection: &str,
    ) -> Result<LoadReport, IngestError> {
        let mut report = LoadReport::default();
        if documents.is_empty() {
            debug!("No documents to load");
            return Ok(report);
        }

        let chunk_size = self
            .config
            .batch_size
            .filter(|size| *size > 0)
            .unwrap_or(documents.len());

        for chunk in documents.chunks(chunk_size) {
            let summary = self
                .send_with_retry(chunk, target_collection, report.succeeded)
                .await?;

            for failure in summary.failures() {
                error!(
                    movie_id = %failure.id,
                    error = failure.error.as_deref().unwrap_or_default(),
                    "Document rejected by index"
                );
            }
            report.record(&summary);
        }

        if report.failed() > 0 {
            warn!(
                attempted = report.attempted,
                succeeded = report.succeeded,
                failed = report.failed(),
                "Bulk load completed with some failures"
            );
        } else {
            info!(count = report.succeeded, "Bulk load completed");
        }
        Ok(report)
    }

    /// Send one bulk request, resending it only when the transport failed.
    ///
    /// A request that produced per-item results is never resent.
    async fn send_with_retry(
        &self,
        chunk: &[MovieDocument],
        target_collection: &str,
        indexed_before: usize,
    ) -> Result<BulkIndexSummary, IngestError> {
        let mut attempts = 0;
        let mut backoff = self.config.retry_backoff;

        loop {
            attempts += 1;
            match self.provider.bulk_index(target_collection, chunk).await {
                Ok(summary) => return Ok(summary),
                Err(e) if e.is_transport() && attempts <= self.config.max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries = self.config.max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Bulk request failed, retrying"
                    );
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => {
                    error!(error = %e, count = chunk.len(), attempts, "Bulk request failed");
                    return Err(IngestError::TransportFailure {
                        attempts,
                        indexed_before,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}
