//! Shared primitives used by every Aura crate.
//!
//! ```rust
//! use acommon::{GenerationOptions, MetadataMap, SessionId};
//!
//! let session = SessionId::from("student-7");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("surface".to_string(), "cli".to_string());
//!
//! let options = GenerationOptions::default().with_temperature(0.7).with_max_tokens(300);
//! assert_eq!(session.as_str(), "student-7");
//! assert_eq!(options.max_tokens, Some(300));
//! ```

pub mod future {
    //! Boxed future alias used by the object-safe async traits.
    //!
    //! ```rust
    //! use acommon::BoxFuture;
    //!
    //! fn word_count<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.split_whitespace().count() })
    //! }
    //!
    //! let _future = word_count("i feel anxious");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifiers and free-form metadata.
    //!
    //! ```rust
    //! use acommon::SessionId;
    //!
    //! let id = SessionId::new("session-42");
    //! assert_eq!(id.to_string(), "session-42");
    //! assert!(!id.is_blank());
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    /// Caller-supplied key of a conversation session.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn is_blank(&self) -> bool {
            self.0.trim().is_empty()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Sampling settings shared by chat and retrieval requests.
    //!
    //! ```rust
    //! use acommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default().with_temperature(0.2);
    //! assert_eq!(options.temperature, Some(0.2));
    //! assert_eq!(options.max_tokens, None);
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }
    }
}

pub use context::{MetadataMap, SessionId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
