//! Auth resolution policy for OpenAI-compatible endpoints.

use crate::ProviderError;

use super::types::OpenAiAuth;

/// Chat completions against the hosted API always need a key.
pub(crate) fn require_api_key(auth: &OpenAiAuth) -> Result<OpenAiAuth, ProviderError> {
    match auth {
        OpenAiAuth::ApiKey(key) if !key.is_empty() => Ok(auth.clone()),
        _ => Err(ProviderError::authentication(
            "no OpenAI API key configured",
        )),
    }
}
