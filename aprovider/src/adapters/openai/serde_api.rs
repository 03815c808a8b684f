//! Wire shapes of `/chat/completions` and `/embeddings`.

use serde::{Deserialize, Serialize};

use crate::{Message, ProviderError, Role};

use super::types::{
    OpenAiEmbeddingRequest, OpenAiEmbeddingResponse, OpenAiFinishReason, OpenAiRequest,
    OpenAiResponse, OpenAiUsage,
};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionBody {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl ChatCompletionBody {
    /// Blank user or system content is rejected before anything is sent.
    /// Assistant turns may be empty, since a filtered completion comes back
    /// without content and stays in the history.
    pub(crate) fn from_request(request: OpenAiRequest) -> Result<Self, ProviderError> {
        if request.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "chat completion needs at least one message",
            ));
        }

        let messages = request
            .messages
            .into_iter()
            .map(wire_message)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        })
    }
}

fn wire_message(message: Message) -> Result<WireMessage, ProviderError> {
    if message.content.trim().is_empty() && message.role != Role::Assistant {
        return Err(ProviderError::invalid_request(format!(
            "{} message has no content",
            message.role.as_str()
        )));
    }

    Ok(WireMessage {
        role: message.role.as_str(),
        content: message.content,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletion {
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatCompletion {
    /// Only the first choice is used.
    pub(crate) fn into_response(self) -> Result<OpenAiResponse, ProviderError> {
        let Some(choice) = self.choices.into_iter().next() else {
            return Err(ProviderError::transport("chat completion carried no choices"));
        };

        let usage = self.usage.map_or_else(OpenAiUsage::default, |usage| OpenAiUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });

        Ok(OpenAiResponse {
            model: self.model,
            content: choice.message.content.unwrap_or_default(),
            finish_reason: finish_reason(choice.finish_reason.as_deref()),
            usage,
        })
    }
}

pub(crate) fn finish_reason(value: Option<&str>) -> OpenAiFinishReason {
    match value.unwrap_or_default() {
        "stop" => OpenAiFinishReason::Stop,
        "length" => OpenAiFinishReason::Length,
        "content_filter" => OpenAiFinishReason::ContentFilter,
        _ => OpenAiFinishReason::Other,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbeddingsBody {
    model: String,
    input: Vec<String>,
}

impl EmbeddingsBody {
    pub(crate) fn from_request(request: OpenAiEmbeddingRequest) -> Result<Self, ProviderError> {
        if request.input.is_empty() {
            return Err(ProviderError::invalid_request("nothing to embed"));
        }

        Ok(Self {
            model: request.model,
            input: request.input,
        })
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn input_count(&self) -> usize {
        self.input.len()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingsReply {
    #[serde(default)]
    model: Option<String>,
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingsReply {
    /// Rows are reordered by `index`; there must be exactly one per input.
    pub(crate) fn into_response(
        self,
        requested_model: &str,
        inputs: usize,
    ) -> Result<OpenAiEmbeddingResponse, ProviderError> {
        if self.data.len() != inputs {
            return Err(ProviderError::transport(format!(
                "embeddings endpoint returned {} vectors for {inputs} inputs",
                self.data.len()
            )));
        }

        let mut rows = self.data;
        rows.sort_by_key(|row| row.index);

        Ok(OpenAiEmbeddingResponse {
            model: self
                .model
                .unwrap_or_else(|| requested_model.to_string()),
            vectors: rows.into_iter().map(|row| row.embedding).collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `error.message` of an OpenAI-style error body, if the body has one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}
