//! Request validation for `/api/convert`.
//!
//! Runs before any external call. Accepts `{"text": .., "audience": ..}`; the
//! older field name `target` is read when `audience` is absent. Either way
//! the value must be one of the known [`Audience`] keys.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::prompt::{self, Audience};
use crate::types::ConversionRequest;

pub const TEXT_FIELD: &str = "text";
pub const AUDIENCE_FIELD: &str = "audience";
pub const LEGACY_AUDIENCE_FIELD: &str = "target";

/// Why a request was rejected. Every variant maps to HTTP 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body is not a JSON object: {0}")]
    MalformedBody(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' must be a string")]
    WrongType(&'static str),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("field '{field}' is {actual} characters long (max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("unknown audience '{0}'")]
    UnknownAudience(String),
}

impl ValidationError {
    /// Message shown to the caller.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MalformedBody(_) => {
                "유효하지 않은 요청입니다. JSON 형식의 요청 본문이 필요합니다.".to_string()
            }
            ValidationError::MissingField(field) => {
                format!("유효하지 않은 요청입니다. '{}' 필드가 필요합니다.", field)
            }
            ValidationError::WrongType(field) => {
                format!("유효하지 않은 요청입니다. '{}' 필드는 문자열이어야 합니다.", field)
            }
            ValidationError::EmptyField(field) => {
                format!("유효하지 않은 요청입니다. '{}' 필드가 비어 있습니다.", field)
            }
            ValidationError::TooLong { field, max, actual } => format!(
                "유효하지 않은 요청입니다. '{}' 필드는 최대 {}자까지 입력할 수 있습니다. (현재 {}자)",
                field, max, actual
            ),
            ValidationError::UnknownAudience(key) => format!(
                "지원하지 않는 대상입니다: '{}'. 가능한 값: {}",
                key,
                Audience::accepted_keys()
            ),
        }
    }
}

/// Checks the shape of incoming conversion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestValidator {
    max_text_chars: usize,
}

impl RequestValidator {
    /// Input limit of the web frontend.
    pub const DEFAULT_MAX_TEXT_CHARS: usize = 500;

    pub fn new(max_text_chars: usize) -> Self {
        Self {
            max_text_chars: max_text_chars.max(1),
        }
    }

    /// Decodes and validates a raw request body.
    pub fn validate_body(&self, raw: &[u8]) -> Result<ConversionRequest, ValidationError> {
        let body: Value = serde_json::from_slice(raw)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
        self.validate(&body)
    }

    /// Validates an already decoded body.
    pub fn validate(&self, body: &Value) -> Result<ConversionRequest, ValidationError> {
        let obj = body.as_object().ok_or_else(|| {
            ValidationError::MalformedBody(format!("expected object, got {}", json_kind(body)))
        })?;

        let text = required_string(obj, TEXT_FIELD)?;
        let audience_key = match present(obj, AUDIENCE_FIELD) {
            Some(_) => required_string(obj, AUDIENCE_FIELD)?,
            None if present(obj, LEGACY_AUDIENCE_FIELD).is_some() => {
                required_string(obj, LEGACY_AUDIENCE_FIELD)?
            }
            None => return Err(ValidationError::MissingField(AUDIENCE_FIELD)),
        };

        let actual = text.chars().count();
        if actual > self.max_text_chars {
            return Err(ValidationError::TooLong {
                field: TEXT_FIELD,
                max: self.max_text_chars,
                actual,
            });
        }

        let template = prompt::resolve(audience_key)
            .map_err(|e| ValidationError::UnknownAudience(e.0))?;

        Ok(ConversionRequest {
            text: text.to_string(),
            audience: template.audience,
        })
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TEXT_CHARS)
    }
}

/// A field set to JSON `null` counts as absent.
fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required_string<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    let value = present(obj, field).ok_or(ValidationError::MissingField(field))?;
    let s = value.as_str().ok_or(ValidationError::WrongType(field))?;
    if s.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(s)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
