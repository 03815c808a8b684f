//! Focused unit tests for OpenAI adapter internals.

#![cfg(test)]

use std::sync::{Arc, Mutex};

use acommon::GenerationOptions;

use crate::{
    Message, ModelProvider, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture, Role,
};

use super::auth::require_api_key;
use super::provider::OpenAiProvider;
use super::serde_api::{
    ChatCompletion, ChatCompletionBody, EmbeddingsReply, error_message, finish_reason,
};
use super::transport::{OpenAiTransport, status_error};
use super::types::{
    OpenAiAuth, OpenAiEmbeddingRequest, OpenAiEmbeddingResponse, OpenAiFinishReason,
    OpenAiRequest, OpenAiResponse,
};

#[derive(Debug)]
struct NoopTransport;

impl OpenAiTransport for NoopTransport {
    fn complete<'a>(
        &'a self,
        _request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }

    fn embed<'a>(
        &'a self,
        _request: OpenAiEmbeddingRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiEmbeddingResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

#[test]
fn openai_request_carries_sampling_options() {
    let request = ModelRequest::new(
        "gpt-3.5-turbo",
        vec![Message::system("persona"), Message::user("hi")],
    )
    .with_options(GenerationOptions::default().with_temperature(0.7).with_max_tokens(300));

    let built = OpenAiRequest::from(request);
    assert_eq!(built.model, "gpt-3.5-turbo");
    assert_eq!(built.messages[0].role, Role::System);
    assert_eq!(built.messages[1].role, Role::User);
    assert_eq!(built.temperature, Some(0.7));
    assert_eq!(built.max_tokens, Some(300));
}

#[tokio::test]
async fn anonymous_provider_fails_before_reaching_the_transport() {
    let provider = OpenAiProvider::new(OpenAiAuth::Anonymous, Arc::new(NoopTransport));
    let request = ModelRequest::new("gpt-4o-mini", vec![Message::user("hi")]);

    let error = provider
        .complete(request)
        .await
        .expect_err("no key configured");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert_eq!(error.message, "no OpenAI API key configured");
}

#[test]
fn finish_reasons_map_to_known_values() {
    let cases = [
        (Some("stop"), OpenAiFinishReason::Stop),
        (Some("length"), OpenAiFinishReason::Length),
        (Some("content_filter"), OpenAiFinishReason::ContentFilter),
        (Some("tool_calls"), OpenAiFinishReason::Other),
        (None, OpenAiFinishReason::Other),
    ];

    for (raw, expected) in cases {
        assert_eq!(finish_reason(raw), expected, "{raw:?}");
    }
}

#[test]
fn chat_completion_uses_first_choice_and_usage() {
    let completion: ChatCompletion = serde_json::from_str(
        r#"{
            "model": "gpt-3.5-turbo-0125",
            "choices": [
                {"message": {"role": "assistant", "content": "That's understandable."}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 42, "completion_tokens": 4, "total_tokens": 46}
        }"#,
    )
    .expect("payload should parse");

    let response = completion.into_response().expect("one choice is enough");
    assert_eq!(response.model, "gpt-3.5-turbo-0125");
    assert_eq!(response.content, "That's understandable.");
    assert_eq!(response.finish_reason, OpenAiFinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 46);
}

#[test]
fn chat_completion_without_choices_is_a_transport_error() {
    let completion: ChatCompletion =
        serde_json::from_str(r#"{"model": "gpt-4o-mini", "choices": []}"#).expect("parse");
    let error = completion.into_response().expect_err("no choices");
    assert_eq!(error.kind, ProviderErrorKind::Transport);
}

#[test]
fn status_codes_map_to_error_kinds() {
    let cases = [
        (401, ProviderErrorKind::Authentication),
        (403, ProviderErrorKind::Authentication),
        (429, ProviderErrorKind::RateLimited),
        (408, ProviderErrorKind::Timeout),
        (504, ProviderErrorKind::Timeout),
        (400, ProviderErrorKind::InvalidRequest),
        (422, ProviderErrorKind::InvalidRequest),
        (502, ProviderErrorKind::Unavailable),
        (503, ProviderErrorKind::Unavailable),
        (500, ProviderErrorKind::Transport),
    ];

    for (code, kind) in cases {
        let status = reqwest::StatusCode::from_u16(code).expect("valid status");
        assert_eq!(status_error(status, "").kind, kind, "status {code}");
    }

    let error = status_error(
        reqwest::StatusCode::UNAUTHORIZED,
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    );
    assert_eq!(error.message, "Incorrect API key provided");
}

#[test]
fn blank_message_content_is_rejected_before_sending() {
    let request = OpenAiRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![Message::user("   ")],
        temperature: None,
        max_tokens: None,
    };

    let error = ChatCompletionBody::from_request(request).expect_err("blank content must fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn empty_assistant_turn_is_kept_on_the_wire() {
    let request = OpenAiRequest {
        model: "gpt-3.5-turbo".to_string(),
        messages: vec![
            Message::user("hi"),
            Message::assistant(""),
            Message::user("are you there?"),
        ],
        temperature: None,
        max_tokens: None,
    };

    let wire = ChatCompletionBody::from_request(request).expect("assistant may be empty");
    let body = serde_json::to_value(&wire).expect("request should serialize");
    assert_eq!(body["messages"][1], serde_json::json!({"role": "assistant", "content": ""}));
}

/// Builds the wire body for every call, then replays canned replies.
#[derive(Debug)]
struct WireCheckingTransport {
    replies: Mutex<Vec<&'static str>>,
}

impl OpenAiTransport for WireCheckingTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let model = request.model.clone();
            ChatCompletionBody::from_request(request)?;
            let content = self.replies.lock().expect("replies lock").remove(0);
            Ok(OpenAiResponse {
                model,
                content: content.to_string(),
                finish_reason: OpenAiFinishReason::ContentFilter,
                usage: Default::default(),
            })
        })
    }

    fn embed<'a>(
        &'a self,
        _request: OpenAiEmbeddingRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiEmbeddingResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

#[tokio::test]
async fn conversation_continues_after_an_empty_reply() {
    let transport = Arc::new(WireCheckingTransport {
        replies: Mutex::new(vec!["", "ok"]),
    });
    let provider = OpenAiProvider::new(
        OpenAiAuth::from_optional_key(Some("sk-test".to_string())),
        transport,
    );

    let mut history = vec![Message::user("hi")];
    let first = provider
        .complete(ModelRequest::new("gpt-3.5-turbo", history.clone()))
        .await
        .expect("first turn");
    assert_eq!(first.text(), "");

    history.push(first.message);
    history.push(Message::user("are you there?"));
    let second = provider
        .complete(ModelRequest::new("gpt-3.5-turbo", history))
        .await
        .expect("empty assistant history must not block the next turn");
    assert_eq!(second.text(), "ok");
}

#[test]
fn unset_sampling_options_are_omitted_on_the_wire() {
    let request = OpenAiRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![Message::user("hello")],
        temperature: None,
        max_tokens: None,
    };

    let wire = ChatCompletionBody::from_request(request).expect("request should build");
    let body = serde_json::to_value(&wire).expect("request should serialize");
    assert_eq!(
        body,
        serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "hello"}]
        })
    );
}

#[test]
fn error_message_reads_openai_envelope() {
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
    assert_eq!(
        error_message(body).as_deref(),
        Some("Incorrect API key provided")
    );
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}

#[test]
fn embedding_response_is_ordered_by_index() {
    let parsed: EmbeddingsReply = serde_json::from_str(
        r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#,
    )
    .expect("payload should parse");

    let response = parsed
        .into_response("all-MiniLM-L6-v2", 2)
        .expect("two vectors for two inputs");
    assert_eq!(response.model, "all-MiniLM-L6-v2");
    assert_eq!(response.vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[test]
fn embedding_response_with_wrong_count_is_a_transport_error() {
    let parsed: EmbeddingsReply =
        serde_json::from_str(r#"{"model":"m","data":[{"index":0,"embedding":[1.0]}]}"#)
            .expect("payload should parse");

    let error = parsed
        .into_response("m", 3)
        .expect_err("count mismatch must fail");
    assert_eq!(error.kind, ProviderErrorKind::Transport);
}

#[test]
fn completions_require_an_api_key() {
    let error = require_api_key(&OpenAiAuth::Anonymous).expect_err("anonymous must fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);

    let keyed = OpenAiAuth::from_optional_key(Some("sk-test".to_string()));
    assert!(require_api_key(&keyed).is_ok());
    assert_eq!(
        OpenAiAuth::from_optional_key(Some("   ".to_string())),
        OpenAiAuth::Anonymous
    );
}

#[test]
fn auth_debug_output_is_redacted() {
    let keyed = OpenAiAuth::from_optional_key(Some("sk-very-secret".to_string()));
    let rendered = format!("{keyed:?}");
    assert!(!rendered.contains("sk-very-secret"));
    assert_eq!(rendered, "OpenAiAuth::ApiKey([REDACTED])");
}
