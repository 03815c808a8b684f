use acommon::SessionId;

use crate::{ChatError, ChatTurnResult};

/// Observation points of a conversational turn. All methods default to no-ops.
pub trait ChatHooks: Send + Sync {
    fn on_turn_complete(&self, _result: &ChatTurnResult) {}

    fn on_transcript_truncated(&self, _session_id: &SessionId, _evicted: usize) {}

    fn on_degraded_reply(&self, _session_id: &SessionId, _error: &ChatError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopChatHooks;

impl ChatHooks for NoopChatHooks {}
