//! Person name value type.

use regex::Regex;
use std::sync::LazyLock;

static LETTERS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").expect("valid name regex"));

static LETTERS_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ0-9\s]+$").expect("valid name regex"));

static EXTENDED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ0-9\s\-'.,]+$").expect("valid name regex"));

/// Options for [`PersonName::is_valid`].
#[derive(Debug, Clone)]
pub struct NameOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub allow_numbers: bool,
    pub allow_special_chars: bool,
    pub required: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 100,
            allow_numbers: false,
            allow_special_chars: false,
            required: false,
        }
    }
}

/// A display or given/family name, with whitespace collapsed and
/// control characters stripped at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    value: String,
    original: String,
}

impl PersonName {
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let original = raw.as_ref().to_string();
        let without_control: String = original.chars().filter(|c| !c.is_control()).collect();
        let value = without_control
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self { value, original }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    #[must_use]
    pub fn is_length_valid(&self, min: usize, max: usize) -> bool {
        (min..=max).contains(&self.len())
    }

    #[must_use]
    pub fn has_valid_characters(&self, allow_numbers: bool, allow_special_chars: bool) -> bool {
        if allow_special_chars {
            return EXTENDED_REGEX.is_match(&self.value);
        }
        if allow_numbers {
            return LETTERS_DIGITS_REGEX.is_match(&self.value);
        }
        LETTERS_REGEX.is_match(&self.value)
    }

    #[must_use]
    pub fn is_valid(&self, options: &NameOptions) -> bool {
        if self.is_empty() {
            return !options.required;
        }
        self.is_length_valid(options.min_length, options.max_length)
            && self.has_valid_characters(options.allow_numbers, options.allow_special_chars)
    }

    /// Preset for human names: 2..=50 chars, apostrophes and hyphens
    /// allowed, required.
    #[must_use]
    pub fn is_valid_person_name(&self) -> bool {
        self.is_valid(&NameOptions {
            min_length: 2,
            max_length: 50,
            allow_numbers: false,
            allow_special_chars: true,
            required: true,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
