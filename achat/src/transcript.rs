//! Bounded, oldest-first message history.
//!
//! ```rust
//! use achat::Transcript;
//! use aprovider::Message;
//!
//! let mut transcript = Transcript::with_limit(2);
//! assert_eq!(transcript.push(Message::user("one")), 0);
//! assert_eq!(transcript.push(Message::assistant("two")), 0);
//! assert_eq!(transcript.push(Message::user("three")), 1);
//!
//! let entries = transcript.entries();
//! let contents = entries
//!     .iter()
//!     .map(|message| message.content.as_str())
//!     .collect::<Vec<_>>();
//! assert_eq!(contents, vec!["two", "three"]);
//! ```

use std::collections::VecDeque;

use aprovider::Message;

/// Ten user/assistant exchanges.
pub const DEFAULT_TRANSCRIPT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: VecDeque<Message>,
    limit: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_limit(DEFAULT_TRANSCRIPT_LIMIT)
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero is raised to one.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Appends `message` and returns how many of the oldest entries were evicted.
    pub fn push(&mut self, message: Message) -> usize {
        self.entries.push_back(message);
        self.truncate_front()
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) -> usize {
        self.entries.extend(messages);
        self.truncate_front()
    }

    pub fn entries(&self) -> Vec<Message> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn truncate_front(&mut self) -> usize {
        let overflow = self.entries.len().saturating_sub(self.limit);
        self.entries.drain(..overflow);
        overflow
    }
}
