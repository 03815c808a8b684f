//! Completion and embedding providers behind object-safe async traits.
//!
//! ```rust
//! use acommon::GenerationOptions;
//! use aprovider::{Message, ModelRequest, Role};
//!
//! let request = ModelRequest::builder("gpt-3.5-turbo")
//!     .message(Message::new(Role::System, "You are Aura."))
//!     .message(Message::new(Role::User, "I can't sleep before exams."))
//!     .options(GenerationOptions::default().with_temperature(0.7).with_max_tokens(300))
//!     .build()
//!     .expect("request should be valid");
//!
//! assert_eq!(request.messages.len(), 2);
//! ```

pub mod adapters;
mod credentials;
mod error;
mod hooks;
mod model;
pub mod prelude;
mod provider;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, execute_observed};
pub use model::{
    EmbeddingRequest, Message, ModelRequest, ModelRequestBuilder, ModelResponse, Role,
    StopReason, TokenUsage,
};
pub use provider::{Embedder, ModelProvider, ProviderFuture};
