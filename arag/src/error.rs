//! Retrieval-layer errors.
//!
//! ```rust
//! use arag::{RetrievalError, RetrievalErrorKind};
//! use aprovider::ProviderError;
//!
//! let error = RetrievalError::embedding(ProviderError::timeout("no reply"));
//! assert_eq!(error.kind, RetrievalErrorKind::Embedding);
//! assert!(error.is_upstream());
//! assert!(!RetrievalError::invalid_request("empty query").is_upstream());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use aprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalErrorKind {
    InvalidRequest,
    Embedding,
    Generation,
    Index,
    Dataset,
}

impl RetrievalErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Embedding => "embedding",
            Self::Generation => "generation",
            Self::Index => "index",
            Self::Dataset => "dataset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalError {
    pub kind: RetrievalErrorKind,
    pub message: String,
    pub provider_kind: Option<ProviderErrorKind>,
}

impl RetrievalError {
    pub fn new(kind: RetrievalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::InvalidRequest, message)
    }

    pub fn index(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Index, message)
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Dataset, message)
    }

    pub fn embedding(error: ProviderError) -> Self {
        Self::from_provider(RetrievalErrorKind::Embedding, error)
    }

    pub fn generation(error: ProviderError) -> Self {
        Self::from_provider(RetrievalErrorKind::Generation, error)
    }

    /// Failure of the embedding or generation dependency.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self.kind,
            RetrievalErrorKind::Embedding | RetrievalErrorKind::Generation
        )
    }

    fn from_provider(kind: RetrievalErrorKind, error: ProviderError) -> Self {
        Self {
            kind,
            message: error.message,
            provider_kind: Some(error.kind),
        }
    }
}

impl Display for RetrievalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RetrievalError {}
