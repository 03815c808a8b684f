//! State shared by every handler through axum's `State` extractor.

use std::sync::Arc;

use achat::{ChatService, ChatSession};
use arag::{DEFAULT_TOP_K, RetrievalService};
use awellbeing::WellbeingStore;

#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<RetrievalService>,
    pub chat: Arc<ChatService>,
    /// Backing store of the `/api` wellbeing endpoints.
    pub wellbeing: Arc<dyn WellbeingStore>,
    pub top_k: usize,
    chat_model: Option<String>,
}

impl AppState {
    pub fn new(
        retrieval: RetrievalService,
        chat: ChatService,
        wellbeing: Arc<dyn WellbeingStore>,
    ) -> Self {
        Self {
            retrieval: Arc::new(retrieval),
            chat: Arc::new(chat),
            wellbeing,
            top_k: DEFAULT_TOP_K,
            chat_model: None,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Overrides the persona's default chat model for session routes.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    /// Aura persona session keyed by the path id.
    pub fn session(&self, id: &str) -> ChatSession {
        let session = ChatSession::aura(id);
        match &self.chat_model {
            Some(model) => session.with_model(model.clone()),
            None => session,
        }
    }

    pub fn knowledge_items(&self) -> usize {
        self.retrieval.index().len()
    }
}
