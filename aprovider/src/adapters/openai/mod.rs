mod auth;
mod embedder;
mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use embedder::OpenAiEmbedder;
pub use provider::OpenAiProvider;
pub use transport::{DEFAULT_OPENAI_BASE_URL, OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAuth, OpenAiEmbeddingRequest, OpenAiEmbeddingResponse, OpenAiFinishReason,
    OpenAiRequest, OpenAiResponse, OpenAiUsage,
};
