//! Wellbeing-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellbeingErrorKind {
    InvalidEntry,
    Storage,
    Api,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellbeingError {
    pub kind: WellbeingErrorKind,
    pub message: String,
}

impl WellbeingError {
    pub fn new(kind: WellbeingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_entry(message: impl Into<String>) -> Self {
        Self::new(WellbeingErrorKind::InvalidEntry, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(WellbeingErrorKind::Storage, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(WellbeingErrorKind::Api, message)
    }
}

impl Display for WellbeingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for WellbeingError {}
