//! Provider-agnostic request, response, and message model types.
//!
//! ```rust
//! use aprovider::{Message, ModelRequest, ProviderErrorKind};
//!
//! let request = ModelRequest::new(
//!     "gpt-4o-mini",
//!     vec![Message::user("How do I handle exam stress?")],
//! );
//! assert!(request.validate().is_ok());
//!
//! let err = ModelRequest::new("", vec![Message::user("hi")])
//!     .validate()
//!     .expect_err("empty model should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//! ```

use std::fmt::{Display, Formatter};

use acommon::{GenerationOptions, MetadataMap};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged turn. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub model: String,
    pub message: Message,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl ModelResponse {
    pub fn text(&self) -> &str {
        &self.message.content
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
    pub metadata: MetadataMap,
}

impl ModelRequest {
    pub fn builder(model: impl Into<String>) -> ModelRequestBuilder {
        ModelRequestBuilder::new(model)
    }

    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: GenerationOptions::default(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// First contract violation, if any: blank model, no messages, zero
    /// `max_tokens`, or a temperature outside `0.0..=2.0`.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let problem = if self.model.trim().is_empty() {
            Some("model must not be empty")
        } else if self.messages.is_empty() {
            Some("at least one message is required")
        } else if self.options.max_tokens == Some(0) {
            Some("max_tokens must be greater than zero")
        } else if self
            .options
            .temperature
            .is_some_and(|temperature| !(0.0..=2.0).contains(&temperature))
        {
            Some("temperature must be within 0.0..=2.0")
        } else {
            None
        };

        match problem {
            Some(message) => Err(ProviderError::invalid_request(message)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequestBuilder {
    model: String,
    messages: Vec<Message>,
    options: GenerationOptions,
    metadata: MetadataMap,
}

impl ModelRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            options: GenerationOptions::default(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<ModelRequest, ProviderError> {
        let request = ModelRequest {
            model: self.model,
            messages: self.messages,
            options: self.options,
            metadata: self.metadata,
        };

        request.validate()?;
        Ok(request)
    }
}

/// Batch of texts to encode with one embedding model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingRequest {
    pub model: String,
    pub inputs: Vec<String>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            model: model.into(),
            inputs,
        }
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request(
                "embedding model must not be empty",
            ));
        }

        if self.inputs.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one embedding input is required",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn invalid_requests_are_rejected_before_sending() {
        let hi = || vec![Message::user("hi")];
        let cases = [
            ModelRequest::new("   ", hi()),
            ModelRequest::new("gpt-4o-mini", Vec::new()),
            ModelRequest::new("gpt-4o-mini", hi())
                .with_options(GenerationOptions::default().with_temperature(2.5)),
            ModelRequest::new("gpt-4o-mini", hi())
                .with_options(GenerationOptions::default().with_max_tokens(0)),
        ];
        for request in cases {
            let err = request.validate().expect_err("request should be rejected");
            assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
        }

        let valid = ModelRequest::builder("gpt-3.5-turbo")
            .message(Message::user("hi"))
            .options(GenerationOptions::default().with_temperature(0.7).with_max_tokens(300))
            .metadata("session_id", "s1")
            .build()
            .expect("valid request");
        assert_eq!(valid.metadata.get("session_id"), Some(&"s1".to_string()));
    }

    #[test]
    fn builder_keeps_message_order() {
        let request = ModelRequest::builder("gpt-3.5-turbo")
            .message(Message::system("persona"))
            .messages(vec![Message::user("one"), Message::assistant("two")])
            .message(Message::user("three"))
            .build()
            .expect("request should build");

        let roles = request
            .messages
            .iter()
            .map(|message| message.role)
            .collect::<Vec<_>>();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
    }

    #[test]
    fn embedding_request_requires_model_and_inputs() {
        assert!(EmbeddingRequest::new("", vec!["q".into()]).validate().is_err());
        assert!(EmbeddingRequest::new("minilm", Vec::new()).validate().is_err());
        assert!(EmbeddingRequest::new("minilm", vec!["q".into()]).validate().is_ok());
    }

    #[test]
    fn role_display_matches_wire_names() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
