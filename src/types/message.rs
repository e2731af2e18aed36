//! Chat message format of OpenAI-compatible completion APIs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let v = serde_json::to_value(Message::system("be polite")).unwrap();
        assert_eq!(v, serde_json::json!({"role": "system", "content": "be polite"}));

        let m: Message = serde_json::from_str(r#"{"role":"user","content":"네"}"#).unwrap();
        assert_eq!(m, Message::user("네"));
    }
}
