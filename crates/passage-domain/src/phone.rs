//! Phone number value type.
//!
//! Construction keeps the trimmed raw input for emptiness and
//! diagnostics, and a digits-only rendering for format checks and the
//! wire payload, so `+55 (11) 91234-5678` and `5511912345678` normalise
//! to the same number while `abc` stays distinguishable from absent.

/// Options for [`Phone::is_valid`].
#[derive(Debug, Clone, Default)]
pub struct PhoneOptions {
    /// Reject an empty value.
    pub required: bool,
    /// When non-empty, the calling code must appear in this list.
    pub allowed_calling_codes: Vec<String>,
    /// When non-empty, the calling code must not appear in this list.
    pub blocked_calling_codes: Vec<String>,
}

/// A phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    /// Trimmed raw input.
    original: String,
    /// Digits only.
    value: String,
}

impl Phone {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let original = raw.as_ref().trim().to_string();
        Self {
            value: original.chars().filter(char::is_ascii_digit).collect(),
            original,
        }
    }

    /// Nothing was staged at all. A non-digit value like `abc` is not
    /// empty — it is present and malformed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// International shape: 8 to 15 digits.
    #[must_use]
    pub fn is_format_valid(&self) -> bool {
        (8..=15).contains(&self.value.len())
    }

    /// Country calling code, when one is plausibly present.
    ///
    /// Numbers of up to 11 digits are treated as national (no code);
    /// 12 digits yield a 2-digit code, 13 a 3-digit code, and anything
    /// longer whatever precedes the final 10 digits.
    #[must_use]
    pub fn calling_code(&self) -> Option<&str> {
        match self.value.len() {
            0..=11 => None,
            12 => Some(&self.value[..2]),
            13 => Some(&self.value[..3]),
            n => Some(&self.value[..n - 10]),
        }
    }

    /// Area code: the two digits preceding the 8-digit local number.
    #[must_use]
    pub fn area_code(&self) -> Option<&str> {
        if self.value.len() < 10 {
            return None;
        }
        let end = self.value.len() - 8;
        Some(&self.value[end - 2..end])
    }

    /// Local number: the final 8 digits.
    #[must_use]
    pub fn local_number(&self) -> Option<&str> {
        if self.value.len() < 8 {
            return None;
        }
        Some(&self.value[self.value.len() - 8..])
    }

    #[must_use]
    pub fn is_allowed_calling_code(&self, allowed: &[String]) -> bool {
        if allowed.is_empty() {
            return true;
        }
        let code = self.calling_code().unwrap_or("");
        allowed.iter().any(|a| a == code)
    }

    #[must_use]
    pub fn is_not_blocked_calling_code(&self, blocked: &[String]) -> bool {
        if blocked.is_empty() {
            return true;
        }
        let code = self.calling_code().unwrap_or("");
        !blocked.iter().any(|b| b == code)
    }

    #[must_use]
    pub fn is_valid(&self, options: &PhoneOptions) -> bool {
        if options.required && self.is_empty() {
            return false;
        }
        if !self.is_empty() && !self.is_format_valid() {
            return false;
        }
        if !self.is_allowed_calling_code(&options.allowed_calling_codes) {
            return false;
        }
        if !self.is_not_blocked_calling_code(&options.blocked_calling_codes) {
            return false;
        }
        true
    }

    /// Digits-only rendering.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The trimmed raw input.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
