//! Orchestrator module for the movies ETL.
//!
//! Coordinates the writer directory, processor, and loader for one full reload
//! of the target collection.

use std::sync::Arc;
use std::time::Instant;

use movies_etl_repository::MovieSource;
use tracing::{info, instrument};

use crate::directory::WriterDirectory;
use crate::errors::IngestError;
use crate::loader::{BulkLoader, LoadReport};
use crate::processor::{MovieProcessor, SkippedRow};

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Create the target index with the movie mappings when it is missing.
    pub ensure_index: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { ensure_index: true }
    }
}

/// Everything a completed run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Rows read from the source.
    pub rows_read: usize,
    /// Rows that failed to transform and were not loaded.
    pub skipped: Vec<SkippedRow>,
    /// Outcome of the bulk load.
    pub load: LoadReport,
}

impl RunReport {
    /// Rows that became documents.
    pub fn transformed(&self) -> usize {
        self.rows_read - self.skipped.len()
    }
}

/// Pipeline that runs extraction, transformation and loading in order.
///
/// The pipeline:
/// - Builds the writer directory before touching any movie row
/// - Transforms every row, recording the ones it skips
/// - Loads the resulting documents and returns a [`RunReport`]
pub struct Pipeline {
    source: Arc<dyn MovieSource>,
    processor: MovieProcessor,
    loader: BulkLoader,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given components.
    pub fn new(source: Arc<dyn MovieSource>, processor: MovieProcessor, loader: BulkLoader) -> Self {
        Self::with_config(source, processor, loader, PipelineConfig::default())
    }

    /// Create a new pipeline with custom configuration.
    pub fn with_config(
        source: Arc<dyn MovieSource>,
        processor: MovieProcessor,
        loader: BulkLoader,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            processor,
            loader,
            config,
        }
    }

    /// Reload `target_collection` from the source.
    ///
    /// Source errors abort the run before anything is written. Row errors are
    /// handled by the processor's policy. Per-document index rejections end up
    /// in the report; a failed bulk request fails the run.
    #[instrument(skip(self))]
    pub async fn run(&self, target_collection: &str) -> Result<RunReport, IngestError> {
        let started = Instant::now();
        info!("Starting movies ETL run");

        let writers = WriterDirectory::build(self.source.as_ref()).await?;
        let rows = self.source.load_movie_rows().await?;
        info!(
            writer_count = writers.len(),
            row_count = rows.len(),
            "Extracted source data"
        );

        let batch = self.processor.process_batch(&rows, &writers)?;

        if self.config.ensure_index {
            self.loader.prepare(target_collection).await?;
        }
        let load = self.loader.load(&batch.documents, target_collection).await?;

        let report = RunReport {
            rows_read: rows.len(),
            skipped: batch.skipped,
            load,
        };

        info!(
            rows_read = report.rows_read,
            transformed = report.transformed(),
            skipped = report.skipped.len(),
            attempted = report.load.attempted,
            succeeded = report.load.succeeded,
            failed = report.load.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Movies ETL run complete"
        );
        Ok(report)
    }
}
