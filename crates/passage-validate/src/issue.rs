//! Structured validation issues.
//!
//! Every fatal finding carries an explicit kind; reporting aggregates
//! on the kind and never parses message text.

use serde::Serialize;

/// Dimension a validation issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Email,
    Phone,
    Username,
    Password,
    NationalId,
    Profile,
    Website,
    Gender,
    Birthdate,
    Timezone,
    Locale,
    AlreadyExists,
    Lookup,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Username => "username",
            Self::Password => "password",
            Self::NationalId => "national_id",
            Self::Profile => "profile",
            Self::Website => "website",
            Self::Gender => "gender",
            Self::Birthdate => "birthdate",
            Self::Timezone => "timezone",
            Self::Locale => "locale",
            Self::AlreadyExists => "already_exists",
            Self::Lookup => "lookup",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fatal validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
