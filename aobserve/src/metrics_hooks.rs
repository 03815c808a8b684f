//! Counters and histograms for model calls, chat turns and retrieval.

use std::time::Duration;

use achat::{ChatError, ChatHooks, ChatTurnResult};
use acommon::SessionId;
use aprovider::{ProviderError, ProviderOperationHooks};
use arag::{IndexStats, RetrievalHooks, RetrievedItem};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_operation_start(&self, operation: &str, model: &str) {
        metrics::counter!(
            "aura_provider_operation_start_total",
            "operation" => operation.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, operation: &str, model: &str, elapsed: Duration) {
        metrics::counter!(
            "aura_provider_success_total",
            "operation" => operation.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "aura_provider_duration_seconds",
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(&self, operation: &str, model: &str, error: &ProviderError, elapsed: Duration) {
        metrics::counter!(
            "aura_provider_failure_total",
            "operation" => operation.to_string(),
            "model" => model.to_string(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "aura_provider_duration_seconds",
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ChatHooks for MetricsObservabilityHooks {
    fn on_turn_complete(&self, result: &ChatTurnResult) {
        metrics::counter!("aura_chat_turns_total").increment(1);
        metrics::histogram!("aura_chat_output_tokens").record(result.usage.output_tokens as f64);
    }

    fn on_transcript_truncated(&self, _session_id: &SessionId, evicted: usize) {
        metrics::counter!("aura_chat_transcript_evicted_total").increment(evicted as u64);
    }

    fn on_degraded_reply(&self, _session_id: &SessionId, error: &ChatError) {
        metrics::counter!(
            "aura_chat_degraded_replies_total",
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
    }
}

impl RetrievalHooks for MetricsObservabilityHooks {
    fn on_index_built(&self, stats: &IndexStats) {
        metrics::gauge!("aura_knowledge_items").set(stats.items as f64);
        metrics::histogram!("aura_index_build_duration_seconds").record(stats.elapsed.as_secs_f64());
    }

    fn on_retrieval(&self, _top_k: usize, hits: &[RetrievedItem], elapsed: Duration) {
        metrics::counter!("aura_retrievals_total").increment(1);
        metrics::histogram!("aura_retrieval_duration_seconds").record(elapsed.as_secs_f64());
        if let Some(nearest) = hits.first() {
            metrics::histogram!("aura_retrieval_nearest_distance").record(nearest.distance as f64);
        }
    }
}
