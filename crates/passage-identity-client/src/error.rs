//! Identity service client error taxonomy.

use thiserror::Error;

/// Machine-readable code the service returns when a create collides
/// with an existing identity on the same email.
pub const EMAIL_IN_USE_CODE: &str = "user.email_already_in_use";

/// HTTP status the service uses for that conflict.
pub const EMAIL_IN_USE_STATUS: u16 = 422;

/// Errors from the remote identity service.
#[derive(Debug, Error)]
pub enum IdentityClientError {
    /// The identity already exists under the given email. Recoverable:
    /// the importer resolves it with a lookup plus update.
    #[error("identity already exists ({code}): {message}")]
    Conflict { code: String, message: String },

    /// The requested identity does not exist.
    #[error("identity not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response from the service.
    #[error("identity service error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("identity service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client itself was misconfigured.
    #[error("invalid identity client configuration: {0}")]
    InvalidConfig(String),
}

impl IdentityClientError {
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type IdentityClientResult<T> = Result<T, IdentityClientError>;
