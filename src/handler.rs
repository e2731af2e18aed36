//! Request Handler: availability check → validation → template → completion.

use axum::http::StatusCode;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::CompletionService;
use crate::redact::SecretRedactor;
use crate::types::{ConversionRequest, ConversionResult};
use crate::validation::RequestValidator;
use crate::Error;

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "변환 서비스를 사용할 수 없습니다. Groq API 키가 설정되지 않았습니다.";
pub const BODY_TOO_LARGE_MESSAGE: &str = "요청 본문이 너무 큽니다.";
pub const UNREADABLE_BODY_MESSAGE: &str = "유효하지 않은 요청입니다. 요청 본문을 읽을 수 없습니다.";
pub const UPSTREAM_FAILURE_PREFIX: &str = "AI 모델 호출 중 오류가 발생했습니다";

/// Orchestrates one `/api/convert` call. Shared read-only across requests.
#[derive(Debug, Clone)]
pub struct ConvertHandler {
    service: CompletionService,
    validator: RequestValidator,
    redactor: SecretRedactor,
}

impl ConvertHandler {
    pub fn new(
        service: CompletionService,
        validator: RequestValidator,
        redactor: SecretRedactor,
    ) -> Self {
        Self {
            service,
            validator,
            redactor,
        }
    }

    /// Handles a raw request body. Never fails: every error becomes a status
    /// code and an `{"error": ..}` body.
    pub async fn handle(&self, raw_body: &[u8]) -> (StatusCode, ConversionResult) {
        let request_id = Uuid::new_v4();

        if !self.service.is_available() {
            warn!(%request_id, "conversion rejected: completion service unavailable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ConversionResult::failed(SERVICE_UNAVAILABLE_MESSAGE),
            );
        }

        let request = match self.validator.validate_body(raw_body) {
            Ok(request) => request,
            Err(e) => {
                warn!(%request_id, reason = %e, "conversion rejected: invalid request");
                return (StatusCode::BAD_REQUEST, ConversionResult::failed(e.user_message()));
            }
        };

        let started = Instant::now();
        let audience = request.audience;
        match self.convert(&request).await {
            Ok(converted) => {
                info!(
                    %request_id,
                    %audience,
                    input_chars = request.text.chars().count(),
                    output_chars = converted.chars().count(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    "conversion succeeded"
                );
                (StatusCode::OK, ConversionResult::converted(request, converted))
            }
            Err(e) => {
                let status = StatusCode::from_u16(e.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = self.error_message(&e);
                error!(
                    %request_id,
                    %audience,
                    code = e.upstream_code().map(|c| c.name()).unwrap_or("-"),
                    error = %self.redactor.redact(&e.to_string()),
                    "conversion failed"
                );
                (status, ConversionResult::failed(message))
            }
        }
    }

    /// Renders the audience instruction and makes the single completion call.
    pub async fn convert(&self, request: &ConversionRequest) -> crate::Result<String> {
        let instruction = request.audience.template().render(&request.text);
        self.service.complete(&instruction, &request.text).await
    }

    fn error_message(&self, e: &Error) -> String {
        match e {
            Error::ServiceUnavailable { .. } => SERVICE_UNAVAILABLE_MESSAGE.to_string(),
            Error::Validation(v) => v.user_message(),
            Error::Upstream { message, .. } => format!(
                "{}: {}",
                UPSTREAM_FAILURE_PREFIX,
                self.redactor.redact(message)
            ),
            other => format!(
                "{}: {}",
                UPSTREAM_FAILURE_PREFIX,
                self.redactor.redact(&other.to_string())
            ),
        }
    }
}
