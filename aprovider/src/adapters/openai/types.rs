//! OpenAI-compatible adapter types and conversions to the shared model.

use std::fmt::Formatter;

use crate::{Message, ModelRequest, ModelResponse, SecretString, StopReason, TokenUsage};

/// Chat-completion call as the adapter sees it, before wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl From<ModelRequest> for OpenAiRequest {
    fn from(value: ModelRequest) -> Self {
        Self {
            model: value.model,
            messages: value.messages,
            temperature: value.options.temperature,
            max_tokens: value.options.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub content: String,
    pub finish_reason: OpenAiFinishReason,
    pub usage: OpenAiUsage,
}

impl OpenAiResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        ModelResponse {
            model: self.model,
            message: Message::assistant(self.content),
            stop_reason: self.finish_reason.into(),
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

impl From<OpenAiFinishReason> for StopReason {
    fn from(value: OpenAiFinishReason) -> Self {
        match value {
            OpenAiFinishReason::Stop => Self::EndTurn,
            OpenAiFinishReason::Length => Self::MaxTokens,
            OpenAiFinishReason::ContentFilter => Self::ContentFilter,
            OpenAiFinishReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<OpenAiUsage> for TokenUsage {
    fn from(value: OpenAiUsage) -> Self {
        Self {
            input_tokens: value.prompt_tokens,
            output_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiEmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
}

/// Vectors ordered to match the request's `input`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiEmbeddingResponse {
    pub model: String,
    pub vectors: Vec<Vec<f32>>,
}

/// Local embedding servers usually accept anonymous calls; the hosted
/// completion endpoint never does.
#[derive(Clone, PartialEq, Eq)]
pub enum OpenAiAuth {
    ApiKey(SecretString),
    Anonymous,
}

impl OpenAiAuth {
    pub fn from_optional_key(api_key: Option<String>) -> Self {
        match SecretString::non_empty(api_key) {
            Some(secret) => Self::ApiKey(secret),
            None => Self::Anonymous,
        }
    }
}

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("OpenAiAuth::ApiKey([REDACTED])"),
            Self::Anonymous => f.write_str("OpenAiAuth::Anonymous"),
        }
    }
}
