//! Turn orchestration: prompt assembly, one generation call, transcript update.

use std::sync::Arc;

use aprovider::{Message, ModelProvider, ModelRequest};

use crate::{
    ChatError, ChatHooks, ChatReply, ChatSession, ChatTurnResult, ConversationStore,
    NoopChatHooks,
};

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    store: Arc<dyn ConversationStore>,
    hooks: Arc<dyn ChatHooks>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            provider,
            store,
            hooks: Arc::new(NoopChatHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ChatHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Runs one exchange and always produces user-facing text.
    ///
    /// Failures become [`ChatReply::Degraded`]; the transcript is left as it was.
    pub async fn respond(&self, session: &ChatSession, user_input: impl Into<String>) -> ChatReply {
        match self.run_turn(session, user_input).await {
            Ok(result) => ChatReply::Answered(result),
            Err(error) => {
                self.hooks.on_degraded_reply(&session.id, &error);
                ChatReply::degraded(error)
            }
        }
    }

    /// Runs one exchange, surfacing any failure.
    ///
    /// On success the user and assistant entries are appended, in that order,
    /// and the transcript is truncated from the front to the store's limit.
    pub async fn run_turn(
        &self,
        session: &ChatSession,
        user_input: impl Into<String>,
    ) -> Result<ChatTurnResult, ChatError> {
        let user_input = user_input.into();
        if user_input.trim().is_empty() {
            return Err(ChatError::invalid_request("user_input must not be empty"));
        }

        let user_message = Message::user(user_input);
        let model_request = self.prepare_request(session, user_message.clone()).await?;
        let model_response = self.provider.complete(model_request).await?;

        let assistant_message = model_response.message.content;
        let evicted = self
            .store
            .append_messages(
                &session.id,
                vec![user_message, Message::assistant(assistant_message.clone())],
            )
            .await?;

        if evicted > 0 {
            self.hooks.on_transcript_truncated(&session.id, evicted);
        }

        let result = ChatTurnResult {
            session_id: session.id.clone(),
            assistant_message,
            stop_reason: model_response.stop_reason,
            usage: model_response.usage,
            evicted,
        };
        self.hooks.on_turn_complete(&result);

        Ok(result)
    }

    /// Forgets the session's transcript.
    pub async fn reset(&self, session: &ChatSession) -> Result<bool, ChatError> {
        self.store.reset(&session.id).await
    }

    async fn prepare_request(
        &self,
        session: &ChatSession,
        user_message: Message,
    ) -> Result<ModelRequest, ChatError> {
        let prior = self.store.load_messages(&session.id).await?;

        let mut builder = ModelRequest::builder(session.model.clone())
            .options(session.options)
            .metadata("session_id", session.id.as_str());
        if let Some(system_prompt) = &session.system_prompt {
            builder = builder.message(Message::system(system_prompt.clone()));
        }

        Ok(builder.messages(prior).message(user_message).build()?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use aprovider::{
        ModelResponse, ProviderError, ProviderFuture, Role, StopReason, TokenUsage,
    };

    use super::*;
    use crate::{ChatErrorKind, InMemoryConversationStore};

    #[derive(Debug, Default)]
    struct FakeProvider {
        requests: Mutex<Vec<ModelRequest>>,
        replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    }

    impl FakeProvider {
        fn replying(replies: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            }
        }
    }

    impl ModelProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                self.requests
                    .lock()
                    .expect("requests lock")
                    .push(request.clone());

                let reply = self
                    .replies
                    .lock()
                    .expect("replies lock")
                    .pop_front()
                    .unwrap_or_else(|| Ok("assistant reply".to_string()))?;

                Ok(ModelResponse {
                    model: request.model,
                    message: Message::assistant(reply),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage {
                        input_tokens: 10,
                        output_tokens: 4,
                        total_tokens: 14,
                    },
                })
            })
        }
    }

    #[tokio::test]
    async fn run_turn_returns_assistant_message_and_persists_transcript() {
        let provider = Arc::new(FakeProvider::default());
        let store = Arc::new(InMemoryConversationStore::new());
        let service = ChatService::new(provider, store.clone());
        let session = ChatSession::aura("s1");

        let result = service
            .run_turn(&session, "hello")
            .await
            .expect("turn should work");
        assert_eq!(result.session_id.as_str(), "s1");
        assert_eq!(result.assistant_message, "assistant reply");
        assert_eq!(result.usage.total_tokens, 14);

        let saved = store.load_messages(&session.id).await.expect("load saved");
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].role, Role::User);
        assert_eq!(saved[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn run_turn_sends_persona_first_then_history_then_input() {
        let provider = Arc::new(FakeProvider::default());
        let store = Arc::new(InMemoryConversationStore::new());
        let session = ChatSession::new("s2", "gpt-3.5-turbo").with_system_prompt("be kind");

        store
            .append_messages(&session.id, vec![Message::user("prior question")])
            .await
            .expect("seed store");

        let service = ChatService::new(provider.clone(), store.clone());
        service
            .run_turn(&session, "new question")
            .await
            .expect("turn should work");

        let requests = provider.requests.lock().expect("requests lock");
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.messages.len(), 3);
        assert_eq!(sent.messages[0], Message::system("be kind"));
        assert_eq!(sent.messages[1], Message::user("prior question"));
        assert_eq!(sent.messages[2], Message::user("new question"));

        let stored = store.load_messages(&session.id).await.expect("load");
        assert!(stored.iter().all(|message| message.role != Role::System));
    }

    #[tokio::test]
    async fn run_turn_forwards_session_generation_options() {
        let provider = Arc::new(FakeProvider::default());
        let service = ChatService::new(provider.clone(), Arc::new(InMemoryConversationStore::new()));

        service
            .run_turn(&ChatSession::aura("s3"), "hi")
            .await
            .expect("turn should work");

        let requests = provider.requests.lock().expect("requests lock");
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
        assert_eq!(requests[0].options.max_tokens, Some(300));
        assert_eq!(requests[0].options.temperature, Some(0.7));
        assert_eq!(
            requests[0].metadata.get("session_id").map(String::as_str),
            Some("s3")
        );
    }

    #[tokio::test]
    async fn run_turn_rejects_empty_user_input() {
        let provider = Arc::new(FakeProvider::default());
        let service = ChatService::new(provider.clone(), Arc::new(InMemoryConversationStore::new()));

        let error = service
            .run_turn(&ChatSession::aura("s4"), "   ")
            .await
            .expect_err("turn should fail");
        assert_eq!(error.kind, ChatErrorKind::InvalidRequest);
        assert!(provider.requests.lock().expect("requests lock").is_empty());
    }

    #[tokio::test]
    async fn respond_degrades_and_leaves_transcript_untouched_on_failure() {
        let provider = Arc::new(FakeProvider::replying(vec![
            Ok("first answer".to_string()),
            Err(ProviderError::unavailable("service unavailable")),
        ]));
        let store = Arc::new(InMemoryConversationStore::new());
        let service = ChatService::new(provider, store.clone());
        let session = ChatSession::aura("s5");

        let first = service.respond(&session, "one").await;
        assert!(!first.is_degraded());

        let second = service.respond(&session, "two").await;
        assert!(second.is_degraded());
        assert!(second.text().contains("sorry"));
        assert!(second.text().ends_with("service unavailable"));

        let saved = store.load_messages(&session.id).await.expect("load");
        assert_eq!(
            saved,
            vec![Message::user("one"), Message::assistant("first answer")]
        );
    }

    #[tokio::test]
    async fn reset_forgets_the_session() {
        let service = ChatService::new(
            Arc::new(FakeProvider::default()),
            Arc::new(InMemoryConversationStore::new()),
        );
        let session = ChatSession::aura("s6");

        service.run_turn(&session, "hi").await.expect("turn");
        assert!(service.reset(&session).await.expect("reset"));
        assert!(
            service
                .store()
                .load_messages(&session.id)
                .await
                .expect("load")
                .is_empty()
        );
    }
}
