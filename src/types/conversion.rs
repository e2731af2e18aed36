use serde::Serialize;

use crate::prompt::Audience;

/// A validated conversion request. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Caller's text, verbatim.
    pub text: String,
    pub audience: Audience,
}

/// Response body of `/api/convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConversionResult {
    Converted {
        original_text: String,
        converted_text: String,
        audience: Audience,
    },
    Failed {
        error: String,
    },
}

impl ConversionResult {
    pub fn converted(request: ConversionRequest, converted_text: impl Into<String>) -> Self {
        ConversionResult::Converted {
            original_text: request.text,
            converted_text: converted_text.into(),
            audience: request.audience,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ConversionResult::Failed {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Converted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converted_shape() {
        let request = ConversionRequest {
            text: "내일까지 부탁드립니다".into(),
            audience: Audience::Superior,
        };
        let result = ConversionResult::converted(request, "내일까지 부탁드리겠습니다.");
        assert!(result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "original_text": "내일까지 부탁드립니다",
                "converted_text": "내일까지 부탁드리겠습니다.",
                "audience": "상사"
            })
        );
    }

    #[test]
    fn test_failed_shape() {
        let result = ConversionResult::failed("oops");
        assert!(!result.is_success());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"error": "oops"}));
    }
}
