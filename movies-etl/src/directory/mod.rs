//! Writer directory for the movies ETL.
//!
//! Movies reference writers by id only. The directory is the full id → writer
//! lookup, loaded once per run before any row is transformed, since a movie
//! may reference a writer stored anywhere in the table.

use std::collections::HashMap;

use movies_etl_repository::MovieSource;
use movies_etl_shared::WriterRef;
use tracing::{debug, instrument};

use crate::errors::IngestError;

/// Read-only writer lookup for one ETL run.
///
/// Entries are kept as loaded, including writers whose name is the unknown
/// marker. Deciding what to do with those is the transformer's job.
#[derive(Debug, Clone, Default)]
pub struct WriterDirectory {
    writers: HashMap<String, WriterRef>,
}

impl WriterDirectory {
    /// Load every writer from `source` in one full-table read.
    ///
    /// # Returns
    ///
    /// * `Ok(WriterDirectory)` - One entry per distinct writer id
    /// * `Err(IngestError::SourceUnavailable)` - If the source cannot be read
    #[instrument(skip(source))]
    pub async fn build(source: &dyn MovieSource) -> Result<Self, IngestError> {
        let writers = source.load_writers().await?;
        let directory: Self = writers.into_iter().collect();

        debug!(writer_count = directory.len(), "Built writer directory");
        Ok(directory)
    }

    /// Look up a writer by id.
    pub fn get(&self, id: &str) -> Option<&WriterRef> {
        self.writers.get(id)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

// A repeated id keeps the last row read.
impl FromIterator<WriterRef> for WriterDirectory {
    fn from_iter<I: IntoIterator<Item = WriterRef>>(iter: I) -> Self {
        Self {
            writers: iter
                .into_iter()
                .map(|writer| (writer.id.clone(), writer))
                .collect(),
        }
    }
}
