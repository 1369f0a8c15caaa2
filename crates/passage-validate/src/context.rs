//! Per-candidate validation context.

use crate::issue::{ErrorKind, ValidationIssue};

/// Which optional dimensions validated successfully. The terminal
/// aggregator reads these; only `email` gates acceptance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationFlags {
    pub email: bool,
    pub phone: bool,
    pub username: bool,
    pub password: bool,
    pub national_id: bool,
    pub profile: bool,
}

impl ValidationFlags {
    /// Names of flags still unset, in declaration order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if !self.email {
            names.push("email");
        }
        if !self.phone {
            names.push("phone");
        }
        if !self.username {
            names.push("username");
        }
        if !self.password {
            names.push("password");
        }
        if !self.national_id {
            names.push("national_id");
        }
        if !self.profile {
            names.push("profile");
        }
        names
    }
}

/// Created fresh per candidate, mutated by every stage, discarded after
/// the accept/reject decision is read off it.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Fatal findings. Non-empty means the record is rejected.
    pub errors: Vec<ValidationIssue>,
    /// Informational and soft-fail notes. Never block import.
    pub logs: Vec<String>,
    pub flags: ValidationFlags,
}

impl ValidationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(kind, message));
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    #[must_use]
    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }

    /// A candidate is accepted for import iff no fatal issue was
    /// recorded by the full chain.
    #[must_use]
    pub fn is_importable(&self) -> bool {
        self.errors.is_empty()
    }

    /// All fatal messages joined for audit entries.
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
