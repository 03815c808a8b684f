use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use achat::{ChatError, ChatHooks, ChatTurnResult};
use acommon::SessionId;
use aprovider::{ProviderError, ProviderOperationHooks};
use arag::{IndexStats, RetrievalHooks, RetrievedItem};

/// Swallows panics raised by the wrapped provider hooks.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_operation_start(&self, operation: &str, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_operation_start(operation, model)
        }));
    }

    fn on_success(&self, operation: &str, model: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, model, elapsed)
        }));
    }

    fn on_failure(&self, operation: &str, model: &str, error: &ProviderError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(operation, model, error, elapsed)
        }));
    }
}

pub struct SafeChatHooks<H> {
    inner: H,
}

impl<H> SafeChatHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ChatHooks for SafeChatHooks<H>
where
    H: ChatHooks,
{
    fn on_turn_complete(&self, result: &ChatTurnResult) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_turn_complete(result)));
    }

    fn on_transcript_truncated(&self, session_id: &SessionId, evicted: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_transcript_truncated(session_id, evicted)
        }));
    }

    fn on_degraded_reply(&self, session_id: &SessionId, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_degraded_reply(session_id, error)
        }));
    }
}

pub struct SafeRetrievalHooks<H> {
    inner: H,
}

impl<H> SafeRetrievalHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> RetrievalHooks for SafeRetrievalHooks<H>
where
    H: RetrievalHooks,
{
    fn on_index_built(&self, stats: &IndexStats) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_index_built(stats)));
    }

    fn on_retrieval(&self, top_k: usize, hits: &[RetrievedItem], elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_retrieval(top_k, hits, elapsed)
        }));
    }
}
