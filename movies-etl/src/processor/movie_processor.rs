//! Movie processor implementation.
//!
//! Runs the row transformation over a whole extraction and applies the
//! row-error policy.

use std::str::FromStr;

use movies_etl_shared::{MovieDocument, SourceRow};
use tracing::{debug, instrument, warn};

use crate::directory::WriterDirectory;
use crate::errors::{IngestError, TransformError};
use crate::processor::transform::transform_row;

/// What to do when a row cannot be transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Record the row as skipped and continue with the next one.
    #[default]
    Skip,
    /// Stop the run at the first bad row, before anything is loaded.
    Abort,
}

impl FromStr for RowErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "invalid row error policy '{}', expected 'skip' or 'abort'",
                other
            )),
        }
    }
}

/// A row left out of the run, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub id: String,
    pub reason: TransformError,
}

/// Result of transforming a batch of rows.
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    /// Documents ready for loading, in source order.
    pub documents: Vec<MovieDocument>,
    /// Rows that failed to transform, in source order.
    pub skipped: Vec<SkippedRow>,
}

/// Processor that transforms source rows into search documents.
#[derive(Debug, Default)]
pub struct MovieProcessor {
    policy: RowErrorPolicy,
}

impl MovieProcessor {
    /// Create a new movie processor that skips bad rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with an explicit row-error policy.
    pub fn with_policy(policy: RowErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RowErrorPolicy {
        self.policy
    }

    /// Process a batch of source rows.
    ///
    /// # Arguments
    ///
    /// * `rows` - The rows to transform
    /// * `writers` - The writer directory for this run
    ///
    /// # Returns
    ///
    /// The transformed documents plus every skipped row. Under
    /// [`RowErrorPolicy::Abort`] the first bad row fails the call with
    /// [`IngestError::RowRejected`].
    #[instrument(skip(self, rows, writers), fields(row_count = rows.len()))]
    pub fn process_batch(
        &self,
        rows: &[SourceRow],
        writers: &WriterDirectory,
    ) -> Result<ProcessedBatch, IngestError> {
        let mut batch = ProcessedBatch {
            documents: Vec::with_capacity(rows.len()),
            skipped: Vec::new(),
        };

        for row in rows {
            match transform_row(row, writers) {
                Ok(doc) => batch.documents.push(doc),
                Err(e) if self.policy == RowErrorPolicy::Abort => {
                    return Err(IngestError::RowRejected(e));
                }
                Err(e) => {
                    warn!(movie_id = %row.id, error = %e, "Skipping row");
                    batch.skipped.push(SkippedRow {
                        id: e.row_id().to_string(),
                        reason: e,
                    });
                }
            }
        }

        debug!(
            document_count = batch.documents.len(),
            skipped_count = batch.skipped.len(),
            "Processed row batch"
        );
        Ok(batch)
    }
}
