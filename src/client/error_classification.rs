//! Turns upstream failures into a single redacted `Error::Upstream`.

use crate::client::chat::ProviderErrorBody;
use crate::error_code::UpstreamErrorCode;
use crate::redact::SecretRedactor;
use crate::transport::TransportError;
use crate::Error;

/// Longest slice of a raw error body carried into the error message.
const MAX_RAW_BODY_CHARS: usize = 300;

/// Error for a non-2xx reply. Prefers the provider's own message and code.
pub(crate) fn error_from_response(status: u16, body: &str, redactor: &SecretRedactor) -> Error {
    let parsed = serde_json::from_str::<ProviderErrorBody>(body).ok();
    let provider_code = parsed
        .as_ref()
        .and_then(|p| p.error.code.as_deref().or(p.error.kind.as_deref()));
    let code = UpstreamErrorCode::classify(status, provider_code);

    let message = parsed
        .as_ref()
        .and_then(|p| p.error.message.clone())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                format!("HTTP {} with empty body", status)
            } else {
                raw.chars().take(MAX_RAW_BODY_CHARS).collect()
            }
        });

    Error::upstream(code, Some(status), redactor.redact(&message))
}

/// Error for a request that never produced a readable reply.
pub(crate) fn error_from_transport(err: TransportError, redactor: &SecretRedactor) -> Error {
    let code = if err.is_timeout() {
        UpstreamErrorCode::Timeout
    } else {
        UpstreamErrorCode::Network
    };
    Error::upstream(code, None, redactor.redact(&err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_and_message(err: Error) -> (UpstreamErrorCode, Option<u16>, String) {
        match err {
            Error::Upstream {
                code,
                status,
                message,
            } => (code, status, message),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_provider_body_is_used() {
        let redactor = SecretRedactor::new().with_secret("gsk_live_key_0001");
        let body = r#"{"error":{"message":"Invalid API Key gsk_live_key_0001","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let (code, status, message) = code_and_message(error_from_response(401, body, &redactor));
        assert_eq!(code, UpstreamErrorCode::Authentication);
        assert_eq!(status, Some(401));
        assert!(message.starts_with("Invalid API Key"));
        assert!(!message.contains("gsk_live_key_0001"));
    }

    #[test]
    fn test_quota_code_overrides_status() {
        let body = r#"{"error":{"message":"You exceeded your quota","code":"insufficient_quota"}}"#;
        let (code, _, _) = code_and_message(error_from_response(429, body, &SecretRedactor::new()));
        assert_eq!(code, UpstreamErrorCode::QuotaExhausted);
    }

    #[test]
    fn test_non_json_body_falls_back_to_raw_text() {
        let long = "x".repeat(1000);
        let (code, _, message) =
            code_and_message(error_from_response(502, &long, &SecretRedactor::new()));
        assert_eq!(code, UpstreamErrorCode::ServerError);
        assert_eq!(message.chars().count(), MAX_RAW_BODY_CHARS);

        let (_, _, message) = code_and_message(error_from_response(503, "  ", &SecretRedactor::new()));
        assert_eq!(message, "HTTP 503 with empty body");
    }

    #[test]
    fn test_transport_error_is_network() {
        let err = TransportError::Other("connection refused".into());
        let (code, status, message) = code_and_message(error_from_transport(err, &SecretRedactor::new()));
        assert_eq!(code, UpstreamErrorCode::Network);
        assert_eq!(status, None);
        assert!(message.contains("connection refused"));
    }
}
