//! Dependency initialization and wiring for the movies ETL.

use std::sync::Arc;

use tracing::info;

use crate::config::EtlConfig;
use crate::loader::BulkLoader;
use crate::orchestrator::{Pipeline, PipelineConfig};
use crate::processor::MovieProcessor;
use crate::errors::IngestError;
use crate::IndexingError;
use movies_etl_repository::{OpenSearchProvider, SqliteMovieSource};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured pipeline ready to run.
    pub pipeline: Pipeline,
    /// The index the pipeline loads into.
    pub index_name: String,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`EtlConfig::from_env`] for the variables read.
    pub async fn new() -> Result<Self, IndexingError> {
        Self::from_config(EtlConfig::from_env()?).await
    }

    /// Initialize all dependencies from an explicit configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the source cannot be opened or the search
    ///   provider cannot be set up
    pub async fn from_config(config: EtlConfig) -> Result<Self, IndexingError> {
        info!(
            database_url = %config.database_url,
            opensearch = ?config.opensearch,
            index_name = %config.index_name,
            batch_size = ?config.loader.batch_size,
            max_retries = config.loader.max_retries,
            row_error_policy = ?config.row_error_policy,
            "Initializing dependencies"
        );

        let source = SqliteMovieSource::connect(&config.database_url)
            .await
            .map_err(IngestError::from)?;

        info!("Movie database connection established");

        let provider = OpenSearchProvider::new(config.opensearch).map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        let processor = MovieProcessor::with_policy(config.row_error_policy);
        let loader = BulkLoader::with_config(Arc::new(provider), config.loader);

        let pipeline = Pipeline::with_config(
            Arc::new(source),
            processor,
            loader,
            PipelineConfig {
                ensure_index: config.ensure_index,
            },
        );

        Ok(Self {
            pipeline,
            index_name: config.index_name,
        })
    }
}
