use reqwest::Proxy;
use std::time::Duration;
use tracing::debug;

/// Client-side knobs of the outbound connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whole-request timeout for one upstream call.
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl TransportConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

/// Authenticated JSON-over-HTTP transport bound to one base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        config: &TransportConfig,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| TransportError::Other(format!("invalid proxy url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` as JSON to `{base_url}{path}` with bearer auth.
    ///
    /// Any HTTP status is returned as a response; only connection-level
    /// failures (DNS, TLS, refused, timeout) are errors here.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        request_id: Option<&str>,
    ) -> Result<reqwest::Response, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "posting to completion service");

        let mut req = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(body);

        if let Some(id) = request_id {
            req = req.header("x-request-id", id);
        }

        req.send().await.map_err(TransportError::Http)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Http(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let t = HttpTransport::new("http://localhost:1234/v1/", "k", &TransportConfig::default())
            .unwrap();
        assert_eq!(t.base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let cfg = TransportConfig::default().with_proxy("http://exa mple.com");
        let err = HttpTransport::new("http://localhost", "k", &cfg).unwrap_err();
        assert!(err.to_string().contains("invalid proxy url"));
    }

    #[test]
    fn test_debug_omits_api_key() {
        let t = HttpTransport::new("http://localhost", "super-secret", &TransportConfig::default())
            .unwrap();
        assert!(!format!("{:?}", t).contains("super-secret"));
    }
}
