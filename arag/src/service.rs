//! Retrieval-augmented question answering.

use std::sync::Arc;
use std::time::Instant;

use acommon::GenerationOptions;
use aprovider::{Embedder, Message, ModelProvider, ModelRequest, TokenUsage};
use tracing::debug;

use crate::prompt::{DEFAULT_RAG_MODEL, DEFAULT_RAG_TEMPERATURE, render_context, render_prompt};
use crate::{KnowledgeIndex, KnowledgeItem, NoopRetrievalHooks, RetrievalError, RetrievalHooks};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedItem {
    pub index: usize,
    pub distance: f32,
    pub item: KnowledgeItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalAnswer {
    pub answer: String,
    /// Nearest first.
    pub sources: Vec<RetrievedItem>,
    pub usage: TokenUsage,
}

/// Stateless over shared read-only data; clone freely across requests.
#[derive(Clone)]
pub struct RetrievalService {
    index: Arc<KnowledgeIndex>,
    embedder: Arc<dyn Embedder>,
    provider: Arc<dyn ModelProvider>,
    model: String,
    options: GenerationOptions,
    hooks: Arc<dyn RetrievalHooks>,
}

impl RetrievalService {
    /// Fails when `embedder` is not the model the index was built with.
    pub fn new(
        index: Arc<KnowledgeIndex>,
        embedder: Arc<dyn Embedder>,
        provider: Arc<dyn ModelProvider>,
    ) -> Result<Self, RetrievalError> {
        if embedder.model() != index.embedding_model() {
            return Err(RetrievalError::index(format!(
                "index was built with embedding model '{}' but queries use '{}'",
                index.embedding_model(),
                embedder.model()
            )));
        }

        Ok(Self {
            index,
            embedder,
            provider,
            model: DEFAULT_RAG_MODEL.to_string(),
            options: GenerationOptions::default().with_temperature(DEFAULT_RAG_TEMPERATURE),
            hooks: Arc::new(NoopRetrievalHooks),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn RetrievalHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn index(&self) -> &KnowledgeIndex {
        &self.index
    }

    /// The `top_k` items nearest to `query`, nearest first.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedItem>, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::invalid_request("query must not be empty"));
        }

        if top_k == 0 {
            return Err(RetrievalError::invalid_request(
                "top_k must be greater than zero",
            ));
        }

        let started = Instant::now();
        let vector = self
            .embedder
            .embed_one(query.to_string())
            .await
            .map_err(RetrievalError::embedding)?;

        let hits = self
            .index
            .search(&vector, top_k)?
            .into_iter()
            .map(|neighbor| {
                self.index
                    .item(neighbor.index)
                    .cloned()
                    .map(|item| RetrievedItem {
                        index: neighbor.index,
                        distance: neighbor.distance,
                        item,
                    })
                    .ok_or_else(|| {
                        RetrievalError::index(format!("no item at index {}", neighbor.index))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(top_k, hits = hits.len(), "retrieved context");
        self.hooks.on_retrieval(top_k, &hits, started.elapsed());
        Ok(hits)
    }

    /// Retrieves context for `query` and asks the model once, without history.
    pub async fn answer(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<RetrievalAnswer, RetrievalError> {
        let sources = self.retrieve(query, top_k).await?;
        let context = render_context(sources.iter().map(|source| &source.item));
        let prompt = render_prompt(&context, query);

        let request = ModelRequest::builder(self.model.clone())
            .options(self.options)
            .message(Message::user(prompt))
            .build()
            .map_err(RetrievalError::generation)?;
        let response = self
            .provider
            .complete(request)
            .await
            .map_err(RetrievalError::generation)?;

        Ok(RetrievalAnswer {
            answer: response.message.content,
            sources,
            usage: response.usage,
        })
    }
}
