//! Request and response bodies of the OpenAI-compatible `/chat/completions`
//! endpoint, limited to the fields the relay sends or reads.

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Path appended to the base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Model and sampling parameters, fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub const DEFAULT_MODEL: &'static str = "llama3-8b-8192";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    /// Upper bounds accepted by the provider.
    pub const MAX_TEMPERATURE: f32 = 2.0;
    pub const MAX_OUTPUT_TOKENS: u32 = 8192;

    /// Clamps sampling parameters into the provider's accepted range.
    pub fn bounded(mut self) -> Self {
        self.temperature = self.temperature.clamp(0.0, Self::MAX_TEMPERATURE);
        self.max_tokens = self.max_tokens.clamp(1, Self::MAX_OUTPUT_TOKENS);
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    /// System instruction followed by the user's text; never streamed.
    pub fn new(params: &'a GenerationParams, system_instruction: &str, user_text: &str) -> Self {
        Self {
            model: &params.model,
            messages: vec![Message::system(system_instruction), Message::user(user_text)],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it is non-blank.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }
}

/// `{"error": {"message", "type", "code"}}` as returned on non-2xx replies.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
