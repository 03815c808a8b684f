//! Transport seam of the OpenAI adapter and its reqwest implementation.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ProviderError, ProviderFuture};

use super::serde_api::{
    ChatCompletion, ChatCompletionBody, EmbeddingsBody, EmbeddingsReply, error_message,
};
use super::types::{
    OpenAiAuth, OpenAiEmbeddingRequest, OpenAiEmbeddingResponse, OpenAiRequest, OpenAiResponse,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;

    fn embed<'a>(
        &'a self,
        request: OpenAiEmbeddingRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiEmbeddingResponse, ProviderError>>;
}

/// HTTP transport for any server speaking the OpenAI wire format.
///
/// The request timeout is whatever the supplied [`Client`] was built with.
#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, path: &str, auth: &OpenAiAuth) -> RequestBuilder {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        let builder = self.client.post(url);
        match auth {
            OpenAiAuth::ApiKey(key) => builder.bearer_auth(key.expose()),
            OpenAiAuth::Anonymous => builder,
        }
    }

    async fn post_json<B, R>(&self, path: &str, auth: &OpenAiAuth, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .request(path, auth)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(err.to_string())
                } else {
                    ProviderError::transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json::<R>()
            .await
            .map_err(|err| ProviderError::transport(format!("unreadable {path} response: {err}")))
    }
}

/// Maps a non-success status to an error kind, preferring the body's own
/// `error.message`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message =
        error_message(body).unwrap_or_else(|| format!("OpenAI request failed with status {status}"));

    match status.as_u16() {
        401 | 403 => ProviderError::authentication(message),
        429 => ProviderError::rate_limited(message),
        408 | 504 => ProviderError::timeout(message),
        400 | 422 => ProviderError::invalid_request(message),
        502 | 503 => ProviderError::unavailable(message),
        _ => ProviderError::transport(message),
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let body = ChatCompletionBody::from_request(request)?;
            let completion: ChatCompletion =
                self.post_json("chat/completions", &auth, &body).await?;
            completion.into_response()
        })
    }

    fn embed<'a>(
        &'a self,
        request: OpenAiEmbeddingRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiEmbeddingResponse, ProviderError>> {
        Box::pin(async move {
            let body = EmbeddingsBody::from_request(request)?;
            let reply: EmbeddingsReply = self.post_json("embeddings", &auth, &body).await?;
            reply.into_response(body.model(), body.input_count())
        })
    }
}
