use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::chat::{
    ChatCompletionRequest, ChatCompletionResponse, GenerationParams, CHAT_COMPLETIONS_PATH,
};
use crate::client::error_classification::{error_from_response, error_from_transport};
use crate::client::CompletionClient;
use crate::error_code::UpstreamErrorCode;
use crate::redact::SecretRedactor;
use crate::transport::{HttpTransport, TransportError};
use crate::{Error, Result};

/// Completion adapter for OpenAI-compatible chat-completion services (Groq).
///
/// One call per conversion; no retry, no streaming.
#[derive(Debug)]
pub struct ChatCompletionClient {
    pub(crate) transport: HttpTransport,
    pub(crate) params: GenerationParams,
    pub(crate) redactor: SecretRedactor,
}

impl ChatCompletionClient {
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    fn model(&self) -> &str {
        &self.params.model
    }

    async fn complete(&self, system_instruction: &str, user_text: &str) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let request = ChatCompletionRequest::new(&self.params, system_instruction, user_text);
        let body = serde_json::to_value(&request)?;

        let started = Instant::now();
        let response = self
            .transport
            .post_json(CHAT_COMPLETIONS_PATH, &body, Some(&request_id))
            .await
            .map_err(|e| error_from_transport(e, &self.redactor))?;

        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .map_err(|e| error_from_transport(TransportError::Http(e), &self.redactor))?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &raw, &self.redactor));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&raw).map_err(|e| {
            Error::upstream(
                UpstreamErrorCode::MalformedResponse,
                Some(status),
                format!("unreadable completion response: {}", e),
            )
        })?;

        let content = parsed.first_content().ok_or_else(|| {
            Error::upstream(
                UpstreamErrorCode::MalformedResponse,
                Some(status),
                "completion response has no message content",
            )
        })?;

        let usage = parsed.usage.clone().unwrap_or_default();
        info!(
            request_id = %request_id,
            model = %self.params.model,
            latency_ms = started.elapsed().as_millis() as u64,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "completion finished"
        );
        debug!(
            request_id = %request_id,
            upstream_id = parsed.id.as_deref().unwrap_or("-"),
            upstream_model = parsed.model.as_deref().unwrap_or("-"),
            finish_reason = parsed.finish_reason().unwrap_or("-"),
            "completion metadata"
        );

        Ok(content.to_string())
    }
}
