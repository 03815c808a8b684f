//! Context and prompt rendering for retrieval-augmented answers.
//!
//! ```rust
//! use arag::KnowledgeItem;
//! use arag::prompt::{render_context, render_prompt};
//!
//! let items = [KnowledgeItem::new("Q1", "A1"), KnowledgeItem::new("Q2", "A2")];
//! let context = render_context(items.iter());
//! assert_eq!(context, "Q: Q1\nA: A1\nQ: Q2\nA: A2");
//!
//! let prompt = render_prompt(&context, "Why am I tired?");
//! assert!(prompt.ends_with("User question: Why am I tired?"));
//! ```

use crate::KnowledgeItem;

pub const DEFAULT_RAG_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_RAG_TEMPERATURE: f32 = 0.7;

pub fn render_context<'a>(items: impl IntoIterator<Item = &'a KnowledgeItem>) -> String {
    items
        .into_iter()
        .map(|item| format!("Q: {}\nA: {}", item.question, item.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_prompt(context: &str, query: &str) -> String {
    format!(
        "You are a warm, empathetic mental health assistant.\n\
         Use the psychological context below to give helpful and safe advice.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         User question: {query}"
    )
}
