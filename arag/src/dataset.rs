//! The static question/answer dataset.
//!
//! ```rust
//! use arag::KnowledgeBase;
//!
//! let base = KnowledgeBase::from_jsonl(
//!     r#"{"question":"How do I sleep better?","answer":"Keep a routine."}
//!
//! {"question":"Is it normal to feel lonely?","answer":"Yes, many students do."}"#,
//! )
//! .expect("dataset should parse");
//!
//! assert_eq!(base.len(), 2);
//! assert_eq!(base.get(1).map(|item| item.answer.as_str()), Some("Yes, many students do."));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::RetrievalError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub question: String,
    pub answer: String,
}

impl KnowledgeItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Items in dataset order; an item's index is its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KnowledgeBase {
    items: Vec<KnowledgeItem>,
}

impl KnowledgeBase {
    pub fn from_items(items: Vec<KnowledgeItem>) -> Result<Self, RetrievalError> {
        if let Some(position) = items
            .iter()
            .position(|item| item.question.trim().is_empty())
        {
            return Err(RetrievalError::dataset(format!(
                "item {position} has an empty question"
            )));
        }

        Ok(Self { items })
    }

    /// Loads a `.json` array or a `.jsonl` file (any other extension is read as JSON Lines).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RetrievalError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            RetrievalError::dataset(format!("failed to read {}: {err}", path.display()))
        })?;

        let is_json_array = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

        if is_json_array {
            Self::from_json(&raw)
        } else {
            Self::from_jsonl(&raw)
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RetrievalError> {
        let items = serde_json::from_str::<Vec<KnowledgeItem>>(raw)
            .map_err(|err| RetrievalError::dataset(format!("invalid dataset array: {err}")))?;
        Self::from_items(items)
    }

    pub fn from_jsonl(raw: &str) -> Result<Self, RetrievalError> {
        let mut items = Vec::new();
        for (line_number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let item = serde_json::from_str::<KnowledgeItem>(line).map_err(|err| {
                RetrievalError::dataset(format!("line {}: {err}", line_number + 1))
            })?;

            if item.question.trim().is_empty() {
                return Err(RetrievalError::dataset(format!(
                    "line {}: empty question",
                    line_number + 1
                )));
            }

            items.push(item);
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.question.as_str())
    }
}
