use acommon::BoxFuture;

use crate::{ModelRequest, ModelResponse, ProviderError};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// Chat-completion backend.
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}

/// Sentence-embedding backend.
///
/// Every vector returned by one embedder has the same length. The model id is
/// recorded next to any index built from these vectors so queries are never
/// compared against vectors from a different model.
pub trait Embedder: Send + Sync {
    fn model(&self) -> &str;

    /// Encodes `inputs` in order; the output has one vector per input.
    fn embed<'a>(
        &'a self,
        inputs: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>>;

    fn embed_one<'a>(&'a self, input: String) -> ProviderFuture<'a, Result<Vec<f32>, ProviderError>> {
        Box::pin(async move {
            let mut vectors = self.embed(vec![input]).await?;
            if vectors.len() != 1 {
                return Err(ProviderError::transport(format!(
                    "expected 1 embedding, received {}",
                    vectors.len()
                )));
            }
            vectors
                .pop()
                .ok_or_else(|| ProviderError::transport("embedding response was empty"))
        })
    }
}
