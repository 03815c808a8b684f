//! Retrieval-augmented answers: embed a query, find the nearest Q&A items,
//! and ask a generation model with that context.
//!
//! ```rust
//! use arag::{FlatL2Index, DEFAULT_TOP_K};
//!
//! let mut index = FlatL2Index::new(2).expect("dimension is positive");
//! index.add(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]]).expect("vectors fit");
//!
//! let nearest = index.search(&[0.9, 0.9], DEFAULT_TOP_K).expect("query fits");
//! assert_eq!(nearest[0].index, 1);
//! ```

mod dataset;
mod error;
mod hooks;
mod index;
mod knowledge;
pub mod prompt;
mod service;

pub mod prelude {
    pub use crate::{
        DEFAULT_TOP_K, FlatL2Index, KnowledgeBase, KnowledgeIndex, KnowledgeItem, Neighbor,
        RetrievalAnswer, RetrievalError, RetrievalErrorKind, RetrievalHooks, RetrievalService,
        RetrievedItem,
    };
}

pub use dataset::{KnowledgeBase, KnowledgeItem};
pub use error::{RetrievalError, RetrievalErrorKind};
pub use hooks::{NoopRetrievalHooks, RetrievalHooks};
pub use index::{FlatL2Index, Neighbor};
pub use knowledge::{DEFAULT_EMBEDDING_BATCH_SIZE, IndexStats, KnowledgeIndex, KnowledgeIndexBuilder};
pub use service::{DEFAULT_TOP_K, RetrievalAnswer, RetrievalService, RetrievedItem};
