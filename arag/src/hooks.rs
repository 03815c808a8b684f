use std::time::Duration;

use crate::{IndexStats, RetrievedItem};

/// Observation points of index construction and retrieval. No-op defaults.
pub trait RetrievalHooks: Send + Sync {
    fn on_index_built(&self, _stats: &IndexStats) {}

    fn on_retrieval(&self, _top_k: usize, _hits: &[RetrievedItem], _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRetrievalHooks;

impl RetrievalHooks for NoopRetrievalHooks {}
