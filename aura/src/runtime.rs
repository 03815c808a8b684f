//! Wiring of providers, services and stores from an [`AuraConfig`].

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use achat::{ChatService, InMemoryConversationStore};
use aobserve::{SafeChatHooks, SafeProviderHooks, SafeRetrievalHooks, TracingObservabilityHooks};
use aprovider::adapters::openai::{OpenAiAuth, OpenAiEmbedder, OpenAiHttpTransport, OpenAiProvider};
use aprovider::{Embedder, ModelProvider, ProviderOperationHooks};
use arag::{KnowledgeBase, KnowledgeIndex, RetrievalError, RetrievalHooks, RetrievalService};
use aserver::AppState;
use awellbeing::{FallbackWellbeingStore, FileWellbeingStore, HttpWellbeingStore, WellbeingError};
use reqwest::Client;

use crate::AuraConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    Http,
    Retrieval,
    Wellbeing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for RuntimeError {}

impl From<RetrievalError> for RuntimeError {
    fn from(error: RetrievalError) -> Self {
        Self::new(RuntimeErrorKind::Retrieval, error.to_string())
    }
}

impl From<WellbeingError> for RuntimeError {
    fn from(error: WellbeingError) -> Self {
        Self::new(RuntimeErrorKind::Wellbeing, error.to_string())
    }
}

/// Shared HTTP client, providers and hooks for one process.
#[derive(Clone)]
pub struct AuraRuntime {
    pub provider: Arc<dyn ModelProvider>,
    pub embedder: Arc<dyn Embedder>,
    pub retrieval_hooks: Arc<dyn RetrievalHooks>,
}

impl AuraRuntime {
    pub fn new(config: &AuraConfig) -> Result<Self, RuntimeError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|error| {
                RuntimeError::new(
                    RuntimeErrorKind::Http,
                    format!("failed to build http client: {error}"),
                )
            })?;
        let provider_hooks: Arc<dyn ProviderOperationHooks> =
            Arc::new(SafeProviderHooks::new(TracingObservabilityHooks));

        let provider = OpenAiProvider::new(
            OpenAiAuth::from_optional_key(config.openai_api_key.clone()),
            Arc::new(
                OpenAiHttpTransport::new(client.clone()).with_base_url(config.openai_base_url.clone()),
            ),
        )
        .with_hooks(Arc::clone(&provider_hooks));

        let embedder = OpenAiEmbedder::new(
            config.embedding_model.clone(),
            OpenAiAuth::from_optional_key(config.embedding_api_key.clone()),
            Arc::new(OpenAiHttpTransport::new(client).with_base_url(config.embedding_base_url.clone())),
        )
        .with_hooks(provider_hooks);

        Ok(Self::with_parts(Arc::new(provider), Arc::new(embedder)))
    }

    /// Runtime over caller-supplied backends, with tracing hooks.
    pub fn with_parts(provider: Arc<dyn ModelProvider>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            provider,
            embedder,
            retrieval_hooks: Arc::new(SafeRetrievalHooks::new(TracingObservabilityHooks)),
        }
    }

    pub fn chat_service(&self) -> ChatService {
        ChatService::new(
            Arc::clone(&self.provider),
            Arc::new(InMemoryConversationStore::new()),
        )
        .with_hooks(Arc::new(SafeChatHooks::new(TracingObservabilityHooks)))
    }

    /// Loads the dataset and embeds every question; a one-time startup cost.
    pub async fn retrieval_service(
        &self,
        config: &AuraConfig,
    ) -> Result<RetrievalService, RuntimeError> {
        let base = KnowledgeBase::from_path(&config.dataset)?;
        let index = KnowledgeIndex::builder(base)
            .hooks(Arc::clone(&self.retrieval_hooks))
            .build(self.embedder.as_ref())
            .await?;

        Ok(RetrievalService::new(
            Arc::new(index),
            Arc::clone(&self.embedder),
            Arc::clone(&self.provider),
        )?
        .with_hooks(Arc::clone(&self.retrieval_hooks)))
    }

    /// Everything the HTTP API needs, with the wellbeing endpoints backed by
    /// the local data file.
    pub async fn app_state(&self, config: &AuraConfig) -> Result<AppState, RuntimeError> {
        let retrieval = self.retrieval_service(config).await?;
        let state = AppState::new(
            retrieval,
            self.chat_service(),
            Arc::new(FileWellbeingStore::new(&config.data_file)),
        )
        .with_top_k(config.top_k);

        Ok(match &config.chat_model {
            Some(model) => state.with_chat_model(model.clone()),
            None => state,
        })
    }
}

/// API-first wellbeing store with the local data file as fallback.
pub fn wellbeing_store(config: &AuraConfig) -> Result<FallbackWellbeingStore, RuntimeError> {
    let api = HttpWellbeingStore::new(config.api_url.clone())?;
    Ok(FallbackWellbeingStore::new(
        Arc::new(api),
        Arc::new(FileWellbeingStore::new(&config.data_file)),
    ))
}
