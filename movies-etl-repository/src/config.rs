//! Configuration types for the OpenSearch provider.

use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the OpenSearch provider.
///
/// Authenticated and unauthenticated clusters, with or without certificate
/// validation, are all served by the same provider; only this struct differs.
#[derive(Clone)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Basic auth username and password.
    pub credentials: Option<(String, String)>,
    /// Validate the server's TLS certificate. Disable only for self-signed
    /// development clusters.
    pub verify_certificates: bool,
    /// Upper bound on every request. An unresponsive cluster fails the request
    /// with a transport failure once this elapses.
    pub request_timeout: Duration,
}

impl OpenSearchConfig {
    /// Create a config for an unauthenticated cluster with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            verify_certificates: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Use basic auth.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Enable or disable TLS certificate validation.
    pub fn with_certificate_validation(mut self, verify: bool) -> Self {
        self.verify_certificates = verify;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for OpenSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSearchConfig")
            .field("url", &self.url)
            .field("username", &self.credentials.as_ref().map(|(user, _)| user))
            .field("verify_certificates", &self.verify_certificates)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpenSearchConfig::new("http://localhost:9200");
        assert!(config.credentials.is_none());
        assert!(config.verify_certificates);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_builder() {
        let config = OpenSearchConfig::new("https://localhost:9200")
            .with_credentials("admin", "secret")
            .with_certificate_validation(false)
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(
            config.credentials,
            Some(("admin".to_string(), "secret".to_string()))
        );
        assert!(!config.verify_certificates);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = OpenSearchConfig::new("https://localhost:9200").with_credentials("admin", "secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
