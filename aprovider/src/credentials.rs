//! Redacted in-memory secrets.
//!
//! ```rust
//! use aprovider::SecretString;
//!
//! let key = SecretString::new("sk-test");
//! assert_eq!(format!("{key:?}"), "[REDACTED]");
//! assert_eq!(key.expose(), "sk-test");
//! assert!(SecretString::non_empty(Some("  ".to_string())).is_none());
//! ```

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Wraps a configured value, treating missing or whitespace-only input as absent.
    pub fn non_empty(value: Option<String>) -> Option<Self> {
        value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8 and the string is not read afterwards.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}
