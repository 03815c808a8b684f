//! Facade over the Aura workspace crates plus the configuration and runtime
//! wiring used by the `aura` binary.
//!
//! ```rust
//! use aura::{ChatSession, DEFAULT_TRANSCRIPT_LIMIT, DEFAULT_TOP_K};
//!
//! let session = ChatSession::aura("student-7");
//! assert_eq!(session.model, "gpt-3.5-turbo");
//! assert_eq!(DEFAULT_TRANSCRIPT_LIMIT, 20);
//! assert_eq!(DEFAULT_TOP_K, 3);
//! ```

pub mod config;
pub mod runtime;

pub use achat;
pub use acommon;
pub use aobserve;
pub use aprovider;
pub use arag;
pub use aserver;
pub use awellbeing;

pub use achat::{
    AURA_SYSTEM_PROMPT, ChatError, ChatErrorKind, ChatReply, ChatService, ChatSession,
    ChatTurnResult, ConversationStore, DEFAULT_TRANSCRIPT_LIMIT, InMemoryConversationStore,
};
pub use acommon::{BoxFuture, GenerationOptions, MetadataMap, SessionId};
pub use aprovider::{
    Embedder, Message, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderErrorKind, Role,
};
pub use arag::{
    DEFAULT_TOP_K, KnowledgeBase, KnowledgeIndex, KnowledgeItem, RetrievalAnswer, RetrievalError,
    RetrievalService,
};
pub use awellbeing::{
    DataSource, FallbackWellbeingStore, FileWellbeingStore, UserStats, WellbeingEntry,
    WellbeingStore,
};

pub use config::{AuraConfig, Command};
pub use runtime::{AuraRuntime, RuntimeError, RuntimeErrorKind, wellbeing_store};
