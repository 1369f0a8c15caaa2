//! Audit-log contract.
//!
//! One append-only entry per terminal record outcome — including
//! rejections — traceable back to the source shard and position. This
//! is the sole durable output of the engine besides the remote identity
//! side effect.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Canonical terminal outcome types, plus `ignored` for staging
/// unique-constraint collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLogType {
    ValidationSuccess,
    ValidationError,
    ImportSuccess,
    ImportError,
    Ignored,
}

impl AuditLogType {
    /// Stable wire string persisted with the entry.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationSuccess => "validation-success",
            Self::ValidationError => "validation-error",
            Self::ImportSuccess => "import-success",
            Self::ImportError => "import-error",
            Self::Ignored => "ignored",
        }
    }
}

impl std::fmt::Display for AuditLogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new entry to persist.
#[derive(Debug, Clone)]
pub struct NewAuditLogEntry {
    pub entry_type: AuditLogType,
    pub message: String,
    /// 1-based position of the record in its source shard.
    pub index_register: String,
    /// Source file the shard came from.
    pub file: String,
    pub batch_id: Uuid,
    /// Local staging id, when one exists.
    pub user_id: Option<i64>,
}

/// A persisted entry. Entries are never mutated or deleted.
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub id: i64,
    pub entry_type: AuditLogType,
    pub message: String,
    pub index_register: String,
    pub file: String,
    pub batch_id: Uuid,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Audit persistence failure.
#[derive(Debug, Error)]
#[error("audit log write failed: {0}")]
pub struct AuditError(pub String);

/// Append-only audit store.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn create(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry, AuditError>;
}

/// Writes one structured entry per terminal outcome.
///
/// A repository failure is logged and swallowed: the outcome it
/// describes has already happened, and one lost entry must not take the
/// sibling records down with it.
#[derive(Clone)]
pub struct AuditLogger {
    repository: Arc<dyn AuditLogRepository>,
}

impl AuditLogger {
    #[must_use]
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        Self { repository }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn log(
        &self,
        entry_type: AuditLogType,
        message: impl Into<String>,
        index_register: impl Into<String>,
        file: impl Into<String>,
        batch_id: Uuid,
        user_id: Option<i64>,
    ) {
        let entry = NewAuditLogEntry {
            entry_type,
            message: message.into(),
            index_register: index_register.into(),
            file: file.into(),
            batch_id,
            user_id,
        };
        if let Err(e) = self.repository.create(entry).await {
            warn!(
                entry_type = %entry_type,
                batch_id = %batch_id,
                error = %e,
                "failed to write audit log entry"
            );
        }
    }
}
