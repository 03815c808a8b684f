//! Bounded conversational sessions over a model provider.
//!
//! ```rust
//! use achat::{ChatSession, InMemoryConversationStore, DEFAULT_TRANSCRIPT_LIMIT};
//!
//! let session = ChatSession::aura("student-42");
//! let store = InMemoryConversationStore::new();
//!
//! assert_eq!(session.id.as_str(), "student-42");
//! assert_eq!(store.transcript_limit(), DEFAULT_TRANSCRIPT_LIMIT);
//! ```

mod error;
mod hooks;
pub mod persona;
mod service;
mod store;
mod transcript;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatHooks, ChatReply, ChatService, ChatSession,
        ChatTurnResult, ConversationStore, InMemoryConversationStore, NoopChatHooks, Transcript,
    };
    pub use acommon::{GenerationOptions, SessionId};
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{ChatHooks, NoopChatHooks};
pub use persona::AURA_SYSTEM_PROMPT;
pub use service::ChatService;
pub use store::{ChatFuture, ConversationStore, InMemoryConversationStore};
pub use transcript::{DEFAULT_TRANSCRIPT_LIMIT, Transcript};
pub use types::{ChatReply, ChatSession, ChatTurnResult};
pub use acommon::SessionId;
