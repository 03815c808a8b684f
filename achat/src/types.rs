//! Chat session, turn result, and reply types.

use acommon::{GenerationOptions, SessionId};
use aprovider::{StopReason, TokenUsage};

use crate::ChatError;
use crate::persona::{
    AURA_SYSTEM_PROMPT, DEFAULT_CHAT_MAX_TOKENS, DEFAULT_CHAT_MODEL, DEFAULT_CHAT_TEMPERATURE,
    apology,
};

/// Identity and generation settings of one conversation. The transcript itself
/// lives in a [`crate::ConversationStore`] under `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: SessionId,
    pub model: String,
    pub system_prompt: Option<String>,
    pub options: GenerationOptions,
}

impl ChatSession {
    pub fn new(id: impl Into<SessionId>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            system_prompt: None,
            options: GenerationOptions::default(),
        }
    }

    /// Session with the Aura persona, `gpt-3.5-turbo`, 300 max tokens and temperature 0.7.
    pub fn aura(id: impl Into<SessionId>) -> Self {
        Self::new(id, DEFAULT_CHAT_MODEL)
            .with_system_prompt(AURA_SYSTEM_PROMPT)
            .with_options(
                GenerationOptions::default()
                    .with_temperature(DEFAULT_CHAT_TEMPERATURE)
                    .with_max_tokens(DEFAULT_CHAT_MAX_TOKENS),
            )
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnResult {
    pub session_id: SessionId,
    pub assistant_message: String,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
    /// Oldest transcript entries dropped to stay within the limit.
    pub evicted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Answered(ChatTurnResult),
    Degraded { error: ChatError, apology: String },
}

impl ChatReply {
    pub(crate) fn degraded(error: ChatError) -> Self {
        let apology = apology(&error.message);
        Self::Degraded { error, apology }
    }

    /// User-facing text for either outcome.
    pub fn text(&self) -> &str {
        match self {
            Self::Answered(result) => &result.assistant_message,
            Self::Degraded { apology, .. } => apology,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn into_result(self) -> Result<ChatTurnResult, ChatError> {
        match self {
            Self::Answered(result) => Ok(result),
            Self::Degraded { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aura_session_uses_persona_defaults() {
        let session = ChatSession::aura("student-1");
        assert_eq!(session.model, "gpt-3.5-turbo");
        assert_eq!(session.options.max_tokens, Some(300));
        assert_eq!(session.options.temperature, Some(0.7));
        assert!(
            session
                .system_prompt
                .as_deref()
                .is_some_and(|prompt| prompt.starts_with("You are Aura"))
        );
    }

    #[test]
    fn degraded_reply_renders_apology() {
        let reply = ChatReply::degraded(ChatError::provider("connection refused"));
        assert!(reply.is_degraded());
        assert_eq!(
            reply.text(),
            "I'm sorry, I'm having trouble responding right now. Error: connection refused"
        );
        assert!(reply.into_result().is_err());
    }
}
