//! Email address value type.
//!
//! The email is the join key with the remote identity service, so this
//! is the one identifier the pipeline treats as required.

use regex::Regex;
use std::sync::LazyLock;

/// Practical email shape: one `@`, no whitespace, dotted domain.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Options for [`Email::is_valid`].
#[derive(Debug, Clone, Default)]
pub struct EmailOptions {
    /// Reject an empty value.
    pub required: bool,
    /// When non-empty, the domain must appear in this list.
    pub allowed_domains: Vec<String>,
    /// When non-empty, the domain must not appear in this list.
    pub blocked_domains: Vec<String>,
}

/// An email address, lowercased and trimmed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    value: String,
}

impl Email {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        Self {
            value: raw.as_ref().trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[must_use]
    pub fn is_format_valid(&self) -> bool {
        EMAIL_REGEX.is_match(&self.value)
    }

    /// The part after the `@`, or `None` when the format is invalid.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        if !self.is_format_valid() {
            return None;
        }
        self.value.split('@').nth(1)
    }

    #[must_use]
    pub fn is_allowed_domain(&self, allowed: &[String]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        self.domain()
            .is_some_and(|d| allowed.iter().any(|a| a == d))
    }

    #[must_use]
    pub fn is_not_blocked_domain(&self, blocked: &[String]) -> bool {
        if blocked.is_empty() {
            return true;
        }
        !self
            .domain()
            .is_some_and(|d| blocked.iter().any(|b| b == d))
    }

    #[must_use]
    pub fn is_valid(&self, options: &EmailOptions) -> bool {
        if options.required && self.is_empty() {
            return false;
        }
        if !self.is_empty() && !self.is_format_valid() {
            return false;
        }
        if !self.is_allowed_domain(&options.allowed_domains) {
            return false;
        }
        if !self.is_not_blocked_domain(&options.blocked_domains) {
            return false;
        }
        true
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
