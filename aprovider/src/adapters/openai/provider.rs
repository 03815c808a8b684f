//! OpenAI chat-completion provider over a pluggable transport.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks, ProviderError,
    ProviderFuture, ProviderOperationHooks, execute_observed,
};

use super::auth::require_api_key;
use super::transport::OpenAiTransport;
use super::types::{OpenAiAuth, OpenAiRequest};

#[derive(Clone)]
pub struct OpenAiProvider {
    auth: OpenAiAuth,
    transport: Arc<dyn OpenAiTransport>,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl OpenAiProvider {
    pub fn new(auth: OpenAiAuth, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            auth,
            transport,
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("auth", &self.auth)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let model = request.model.clone();
            let hooks = self.hooks.as_ref();

            execute_observed("complete", &model, hooks, async {
                let auth = require_api_key(&self.auth)?;
                let response = self
                    .transport
                    .complete(OpenAiRequest::from(request), auth)
                    .await?;
                Ok(response.into_model_response())
            })
            .await
        })
    }
}
