use std::time::Duration;

use crate::client::chat::GenerationParams;
use crate::client::core::ChatCompletionClient;
use crate::redact::SecretRedactor;
use crate::transport::{HttpTransport, TransportConfig};
use crate::{Error, ErrorContext, Result};

/// Builder for [`ChatCompletionClient`].
///
/// Keep this surface area small: the model and sampling parameters are fixed
/// at build time and never change per request.
pub struct CompletionClientBuilder {
    api_key: String,
    base_url: String,
    params: GenerationParams,
    transport: TransportConfig,
}

impl CompletionClientBuilder {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            params: GenerationParams::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Override the base URL (a local gateway, or a mock server in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.params.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.params.max_tokens = max_tokens;
        self
    }

    /// Upstream request timeout. The original service had none; a bounded
    /// wait keeps one slow completion from pinning a request forever.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    pub fn transport_config(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn build(self) -> Result<ChatCompletionClient> {
        let api_key = self.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(Error::configuration_with_context(
                "API key is empty",
                ErrorContext::new()
                    .with_field_path("GROQ_API_KEY")
                    .with_source("completion_client"),
            ));
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid completion base URL",
                ErrorContext::new()
                    .with_field_path("GROQ_BASE_URL")
                    .with_details(format!("{}: {}", self.base_url, e))
                    .with_source("completion_client"),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "completion base URL must be http or https",
                ErrorContext::new()
                    .with_field_path("GROQ_BASE_URL")
                    .with_details(self.base_url.clone())
                    .with_source("completion_client"),
            ));
        }

        let transport = HttpTransport::new(&self.base_url, api_key.clone(), &self.transport)?;

        Ok(ChatCompletionClient {
            transport,
            params: self.params.bounded(),
            redactor: SecretRedactor::new().with_secret(api_key),
        })
    }
}
