//! Common `aprovider` imports for downstream crates.

pub use crate::{
    Embedder, Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse,
    NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture, ProviderOperationHooks,
    Role, StopReason, TokenUsage, execute_observed,
};
pub use acommon::{BoxFuture, GenerationOptions, MetadataMap};
