//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use aprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Store,
}

impl ChatErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Provider => "provider",
            Self::Store => "store",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    /// Set when the failure came from the generation call.
    pub provider_kind: Option<ProviderErrorKind>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let kind = if value.kind == ProviderErrorKind::InvalidRequest {
            ChatErrorKind::InvalidRequest
        } else {
            ChatErrorKind::Provider
        };

        Self {
            kind,
            message: value.message,
            provider_kind: Some(value.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_kind() {
        let error = ChatError::from(ProviderError::rate_limited("quota exceeded"));
        assert_eq!(error.kind, ChatErrorKind::Provider);
        assert_eq!(error.provider_kind, Some(ProviderErrorKind::RateLimited));
        assert_eq!(error.to_string(), "Provider: quota exceeded");
    }

    #[test]
    fn provider_invalid_requests_stay_invalid_requests() {
        let error = ChatError::from(ProviderError::invalid_request("max_tokens too large"));
        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
    }
}
