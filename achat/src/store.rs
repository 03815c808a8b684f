//! Conversation storage contracts and the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use acommon::{BoxFuture, SessionId};
use aprovider::Message;

use crate::{ChatError, DEFAULT_TRANSCRIPT_LIMIT, Transcript};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

pub trait ConversationStore: Send + Sync {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Vec<Message>, ChatError>>;

    /// Appends in order and truncates to the store's limit in the same critical
    /// section. Returns the number of evicted entries.
    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> ChatFuture<'a, Result<usize, ChatError>>;

    /// Drops the session's transcript. Returns whether anything was stored.
    fn reset<'a>(&'a self, session_id: &'a SessionId) -> ChatFuture<'a, Result<bool, ChatError>>;
}

#[derive(Debug)]
pub struct InMemoryConversationStore {
    sessions: Mutex<HashMap<SessionId, Transcript>>,
    transcript_limit: usize,
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::with_transcript_limit(DEFAULT_TRANSCRIPT_LIMIT)
    }
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript_limit(transcript_limit: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            transcript_limit,
        }
    }

    pub fn transcript_limit(&self) -> usize {
        self.transcript_limit
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Transcript>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Vec<Message>, ChatError>> {
        Box::pin(async move {
            let sessions = self.sessions()?;
            Ok(sessions
                .get(session_id)
                .map(Transcript::entries)
                .unwrap_or_default())
        })
    }

    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> ChatFuture<'a, Result<usize, ChatError>> {
        Box::pin(async move {
            let mut sessions = self.sessions()?;
            let limit = self.transcript_limit;
            let evicted = sessions
                .entry(session_id.clone())
                .or_insert_with(|| Transcript::with_limit(limit))
                .extend(messages);

            Ok(evicted)
        })
    }

    fn reset<'a>(&'a self, session_id: &'a SessionId) -> ChatFuture<'a, Result<bool, ChatError>> {
        Box::pin(async move {
            let mut sessions = self.sessions()?;
            Ok(sessions
                .remove(session_id)
                .is_some_and(|transcript| !transcript.is_empty()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_then_load_preserves_insertion_order() {
        let store = InMemoryConversationStore::new();
        let session = SessionId::new("s1");

        store
            .append_messages(
                &session,
                vec![Message::user("I feel anxious"), Message::assistant("I'm here.")],
            )
            .await
            .expect("append should work");

        let loaded = store.load_messages(&session).await.expect("load should work");
        assert_eq!(
            loaded,
            vec![Message::user("I feel anxious"), Message::assistant("I'm here.")]
        );
    }

    #[tokio::test]
    async fn append_enforces_limit_and_reports_evictions() {
        let store = InMemoryConversationStore::with_transcript_limit(4);
        let session = SessionId::new("s2");

        for turn in 0..3 {
            let evicted = store
                .append_messages(
                    &session,
                    vec![
                        Message::user(format!("q{turn}")),
                        Message::assistant(format!("a{turn}")),
                    ],
                )
                .await
                .expect("append should work");
            assert_eq!(evicted, if turn == 2 { 2 } else { 0 });
        }

        let loaded = store.load_messages(&session).await.expect("load should work");
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[0], Message::user("q1"));
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_resettable() {
        let store = InMemoryConversationStore::new();
        let alice = SessionId::new("alice");
        let bob = SessionId::new("bob");

        store
            .append_messages(&alice, vec![Message::user("hello")])
            .await
            .expect("append should work");

        assert!(store.load_messages(&bob).await.expect("load").is_empty());
        assert!(store.reset(&alice).await.expect("reset"));
        assert!(!store.reset(&alice).await.expect("second reset"));
        assert!(store.load_messages(&alice).await.expect("load").is_empty());
    }
}
