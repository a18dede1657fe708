//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use movies_etl_shared::MovieDocument;
use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::{bulk, index_config};
use crate::types::BulkIndexSummary;

/// OpenSearch provider implementation.
///
/// # Example
///
/// ```ignore
/// use movies_etl_repository::{OpenSearchConfig, OpenSearchProvider, SearchIndexProvider};
///
/// let config = OpenSearchConfig::new("https://localhost:9200")
///     .with_credentials("admin", "admin")
///     .with_certificate_validation(false);
/// let provider = OpenSearchProvider::new(config)?;
///
/// provider.ensure_index_exists("movies").await?;
/// let summary = provider.bulk_index("movies", &documents).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider from the given connection settings.
    ///
    /// No request is sent here; an unreachable cluster surfaces on first use.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: OpenSearchConfig) -> Result<Self, SearchIndexError> {
        let parsed_url = Url::parse(&config.url)
            .map_err(|e| SearchIndexError::validation(format!("Invalid URL {}: {}", config.url, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(config.request_timeout)
            .disable_proxy();

        if let Some((username, password)) = &config.credentials {
            builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
        }

        if !config.verify_certificates {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            authenticated = config.credentials.is_some(),
            verify_certificates = config.verify_certificates,
            timeout_secs = config.request_timeout.as_secs(),
            "Created OpenSearch provider"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchIndexError> {
        if index.is_empty() {
            return Err(SearchIndexError::validation("Index name cannot be empty"));
        }

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::transport(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(index_config::get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created index with movie mappings");
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[MovieDocument],
    ) -> Result<BulkIndexSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BulkIndexSummary::default());
        }

        let body: Vec<JsonBody<Value>> = bulk::build_bulk_lines(index, documents)?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::transport(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        // A body we cannot read leaves every item's outcome unknown.
        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::transport(format!("Failed to read bulk response: {}", e)))?;

        let summary = bulk::parse_bulk_response(&body, documents)?;
        debug!(
            index = %index,
            total = summary.total(),
            failed = summary.failed(),
            "Bulk request completed"
        );
        Ok(summary)
    }
}
