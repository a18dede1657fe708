//! Run settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use movies_etl_repository::opensearch::index_config::DEFAULT_INDEX_NAME;
use movies_etl_repository::OpenSearchConfig;

use crate::loader::LoaderConfig;
use crate::processor::RowErrorPolicy;
use crate::IndexingError;

/// Default relational source.
const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default initial retry backoff in milliseconds.
const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Everything one ETL run is parameterized by.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub database_url: String,
    pub opensearch: OpenSearchConfig,
    pub index_name: String,
    pub ensure_index: bool,
    pub loader: LoaderConfig,
    pub row_error_policy: RowErrorPolicy,
}

impl EtlConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: Relational source (default: sqlite://db.sqlite)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: Basic auth, both or neither
    /// - `OPENSEARCH_VERIFY_CERTS`: Validate TLS certificates (default: true)
    /// - `OPENSEARCH_TIMEOUT_SECS`: Per-request timeout (default: 30)
    /// - `INDEX_NAME`: Target index (default: movies)
    /// - `ENSURE_INDEX`: Create the index when missing (default: true)
    /// - `BULK_BATCH_SIZE`: Documents per bulk request (default: all in one)
    /// - `BULK_MAX_RETRIES`: Resends after a transport failure (default: 0)
    /// - `BULK_RETRY_BACKOFF_MS`: Initial backoff between resends (default: 500)
    /// - `ROW_ERROR_POLICY`: "skip" or "abort" (default: skip)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut opensearch = OpenSearchConfig::new(
            get("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
        )
        .with_certificate_validation(parse_bool(&get, "OPENSEARCH_VERIFY_CERTS", true)?)
        .with_request_timeout(Duration::from_secs(parse_or(
            &get,
            "OPENSEARCH_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?));

        match (get("OPENSEARCH_USERNAME"), get("OPENSEARCH_PASSWORD")) {
            (Some(username), Some(password)) => {
                opensearch = opensearch.with_credentials(username, password);
            }
            (None, None) => {}
            _ => {
                return Err(IndexingError::config(
                    "OPENSEARCH_USERNAME and OPENSEARCH_PASSWORD must be set together",
                ));
            }
        }

        let batch_size = get("BULK_BATCH_SIZE")
            .map(|v| parse_value::<usize>("BULK_BATCH_SIZE", &v))
            .transpose()?;
        if batch_size == Some(0) {
            return Err(IndexingError::config("BULK_BATCH_SIZE must be greater than 0"));
        }

        let loader = LoaderConfig {
            batch_size,
            max_retries: parse_or(&get, "BULK_MAX_RETRIES", 0)?,
            retry_backoff: Duration::from_millis(parse_or(
                &get,
                "BULK_RETRY_BACKOFF_MS",
                DEFAULT_RETRY_BACKOFF_MS,
            )?),
        };

        let row_error_policy = match get("ROW_ERROR_POLICY") {
            Some(v) => v.parse::<RowErrorPolicy>().map_err(IndexingError::config)?,
            None => RowErrorPolicy::default(),
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            opensearch,
            index_name: get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            ensure_index: parse_bool(&get, "ENSURE_INDEX", true)?,
            loader,
            row_error_policy,
        })
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, IndexingError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| IndexingError::config(format!("Invalid value for {}: {}", key, value)))
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(key).map_or(Ok(default), |v| parse_value(key, &v))
}

fn parse_bool<G>(get: &G, key: &str, default: bool) -> Result<bool, IndexingError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(IndexingError::config(format!("Invalid value for {}: {}", key, v))),
        },
    }
}
