//! Username value type.

use regex::Regex;
use std::sync::LazyLock;

/// Starts with a letter or underscore, then word characters.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("valid username regex"));

static EMAIL_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Options for [`Username::is_valid`].
#[derive(Debug, Clone, Default)]
pub struct UsernameOptions {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// A login name, trimmed at construction. The original raw input is kept
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username {
    value: String,
    original: String,
}

impl Username {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let original = raw.as_ref().to_string();
        Self {
            value: original.trim().to_string(),
            original,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// An email-shaped value is not allowed as a username.
    #[must_use]
    pub fn is_email_format(&self) -> bool {
        EMAIL_SHAPE_REGEX.is_match(&self.value)
    }

    #[must_use]
    pub fn is_format_valid(&self) -> bool {
        USERNAME_REGEX.is_match(&self.value)
    }

    #[must_use]
    pub fn is_length_valid(&self, min: Option<usize>, max: Option<usize>) -> bool {
        let len = self.value.chars().count();
        if min.is_some_and(|m| len < m) {
            return false;
        }
        if max.is_some_and(|m| len > m) {
            return false;
        }
        true
    }

    #[must_use]
    pub fn is_valid(&self, options: &UsernameOptions) -> bool {
        if options.required && self.is_empty() {
            return false;
        }
        if !self.is_length_valid(options.min_length, options.max_length) {
            return false;
        }
        if !self.is_format_valid() {
            return false;
        }
        if self.is_email_format() {
            return false;
        }
        true
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The raw value before trimming.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
