//! Embeddings from any OpenAI-compatible `/embeddings` endpoint.

use std::sync::Arc;

use crate::{
    Embedder, EmbeddingRequest, NoopOperationHooks, ProviderError, ProviderFuture,
    ProviderOperationHooks, execute_observed,
};

use super::transport::OpenAiTransport;
use super::types::{OpenAiAuth, OpenAiEmbeddingRequest};

#[derive(Clone)]
pub struct OpenAiEmbedder {
    model: String,
    auth: OpenAiAuth,
    transport: Arc<dyn OpenAiTransport>,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl OpenAiEmbedder {
    pub fn new(
        model: impl Into<String>,
        auth: OpenAiAuth,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            model: model.into(),
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

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("model", &self.model)
            .field("auth", &self.auth)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

fn check_dimensions(vectors: &[Vec<f32>]) -> Result<(), ProviderError> {
    let Some(first) = vectors.first() else {
        return Ok(());
    };

    if first.is_empty() {
        return Err(ProviderError::transport("embedding vectors must not be empty"));
    }

    if let Some(mismatch) = vectors.iter().find(|vector| vector.len() != first.len()) {
        return Err(ProviderError::transport(format!(
            "embedding dimension mismatch: {} vs {}",
            first.len(),
            mismatch.len()
        )));
    }

    Ok(())
}

impl Embedder for OpenAiEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    fn embed<'a>(
        &'a self,
        inputs: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>> {
        Box::pin(async move {
            let request = EmbeddingRequest::new(self.model.clone(), inputs);
            request.validate()?;

            execute_observed("embed", &self.model, self.hooks.as_ref(), async {
                let response = self
                    .transport
                    .embed(
                        OpenAiEmbeddingRequest {
                            model: request.model,
                            input: request.inputs,
                        },
                        self.auth.clone(),
                    )
                    .await?;
                check_dimensions(&response.vectors)?;
                Ok(response.vectors)
            })
            .await
        })
    }
}
