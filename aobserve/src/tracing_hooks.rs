//! Structured log events for model calls, chat turns and retrieval.
//!
//! ```rust
//! use achat::ChatHooks;
//! use aobserve::TracingObservabilityHooks;
//!
//! fn accepts_chat_hooks(_hooks: &dyn ChatHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_chat_hooks(&hooks);
//! ```

use std::time::Duration;

use achat::{ChatError, ChatHooks, ChatTurnResult};
use acommon::SessionId;
use aprovider::{ProviderError, ProviderOperationHooks};
use arag::{IndexStats, RetrievalHooks, RetrievedItem};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_operation_start(&self, operation: &str, model: &str) {
        tracing::debug!(phase = "provider", event = "operation_start", operation, model);
    }

    fn on_success(&self, operation: &str, model: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            operation,
            model,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(&self, operation: &str, model: &str, error: &ProviderError, elapsed: Duration) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            operation,
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            retryable = error.retryable,
            error = %error
        );
    }
}

impl ChatHooks for TracingObservabilityHooks {
    fn on_turn_complete(&self, result: &ChatTurnResult) {
        tracing::info!(
            phase = "chat",
            event = "turn_complete",
            session_id = %result.session_id,
            input_tokens = result.usage.input_tokens,
            output_tokens = result.usage.output_tokens,
            evicted = result.evicted
        );
    }

    fn on_transcript_truncated(&self, session_id: &SessionId, evicted: usize) {
        tracing::debug!(
            phase = "chat",
            event = "transcript_truncated",
            session_id = %session_id,
            evicted
        );
    }

    fn on_degraded_reply(&self, session_id: &SessionId, error: &ChatError) {
        tracing::warn!(
            phase = "chat",
            event = "degraded_reply",
            session_id = %session_id,
            error_kind = error.kind.as_str(),
            error = %error
        );
    }
}

impl RetrievalHooks for TracingObservabilityHooks {
    fn on_index_built(&self, stats: &IndexStats) {
        tracing::info!(
            phase = "retrieval",
            event = "index_built",
            items = stats.items,
            dimension = stats.dimension,
            embedding_model = %stats.embedding_model,
            elapsed_ms = stats.elapsed.as_millis() as u64
        );
    }

    fn on_retrieval(&self, top_k: usize, hits: &[RetrievedItem], elapsed: Duration) {
        tracing::info!(
            phase = "retrieval",
            event = "retrieval",
            top_k,
            hits = hits.len(),
            nearest_distance = hits.first().map(|hit| hit.distance as f64),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }
}
