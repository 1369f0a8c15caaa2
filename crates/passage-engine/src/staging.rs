//! Staging repository contract and the loader that feeds it.
//!
//! The staging store itself (schema, SQL) is an external collaborator;
//! the engine sees only this minimal contract: forward pagination by
//! ascending id and a create that may collide on the username unique
//! constraint.

use crate::audit::{AuditLogType, AuditLogger};
use crate::shard::{Provenance, Shard, ShardError, ShardSource};
use async_trait::async_trait;
use passage_domain::{CandidateRecord, RawCandidate};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};
use uuid::Uuid;

/// Staging store failure.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Unique-constraint collision on the named field. Treated as
    /// `ignored`, not as a failure.
    #[error("unique constraint violation on {field}")]
    UniqueViolation { field: String },

    #[error("staging store error: {0}")]
    Storage(String),
}

impl StagingError {
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

/// Minimal staging store contract.
#[async_trait]
pub trait StagingRepository: Send + Sync {
    /// Forward pagination by ascending id; `cursor` is the exclusive
    /// lower bound from the previous page.
    async fn find_many(
        &self,
        take: usize,
        cursor: Option<i64>,
    ) -> Result<Vec<CandidateRecord>, StagingError>;

    /// Persist one staged candidate, returning it with its assigned id.
    async fn create(&self, record: RawCandidate) -> Result<CandidateRecord, StagingError>;
}

/// One mapped payload with its shard provenance, ready for staging.
#[derive(Debug, Clone)]
pub struct StagedImport {
    pub record: RawCandidate,
    pub provenance: Provenance,
}

/// Counts from one staging load run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub created: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Default staging-load concurrency.
pub const DEFAULT_STAGING_CONCURRENCY: usize = 10;

/// Drives mapped payloads into the staging store under a bounded
/// concurrency budget, auditing every outcome.
pub struct StagingLoader {
    repository: Arc<dyn StagingRepository>,
    audit: AuditLogger,
    concurrency: usize,
}

impl StagingLoader {
    #[must_use]
    pub fn new(
        repository: Arc<dyn StagingRepository>,
        audit: AuditLogger,
        concurrency: usize,
    ) -> Self {
        Self {
            repository,
            audit,
            concurrency: concurrency.max(1),
        }
    }

    /// Load a batch of mapped payloads. Records without any essential
    /// identifier are audited and skipped; username collisions audit as
    /// `ignored`; every other failure audits as an error. One record's
    /// failure never aborts the batch.
    pub async fn load(&self, imports: Vec<StagedImport>) -> LoadSummary {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set: JoinSet<LoadSummary> = JoinSet::new();

        for import in imports {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let repository = self.repository.clone();
            let audit = self.audit.clone();

            join_set.spawn(async move {
                let _permit = permit;
                load_one(repository, audit, import).await
            });
        }

        let mut summary = LoadSummary::default();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(one) => {
                    summary.created += one.created;
                    summary.ignored += one.ignored;
                    summary.failed += one.failed;
                }
                Err(e) => {
                    error!(error = %e, "staging load task aborted");
                    summary.failed += 1;
                }
            }
        }

        info!(
            created = summary.created,
            ignored = summary.ignored,
            failed = summary.failed,
            "staging load finished"
        );
        summary
    }
}

/// Streams the staging store as ordered shards, one page per shard,
/// using cursor pagination by ascending id.
pub struct StagingShardSource {
    repository: Arc<dyn StagingRepository>,
    page_size: usize,
    cursor: Option<i64>,
    batch_id: Uuid,
    exhausted: bool,
}

impl StagingShardSource {
    #[must_use]
    pub fn new(repository: Arc<dyn StagingRepository>, page_size: usize) -> Self {
        Self {
            repository,
            page_size: page_size.max(1),
            cursor: None,
            batch_id: Uuid::new_v4(),
            exhausted: false,
        }
    }

    /// Batch id stamped on every shard this source yields.
    #[must_use]
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }
}

#[async_trait]
impl ShardSource for StagingShardSource {
    async fn next_shard(&mut self) -> Result<Option<Shard>, ShardError> {
        if self.exhausted {
            return Ok(None);
        }
        let records = self
            .repository
            .find_many(self.page_size, self.cursor)
            .await
            .map_err(|e| ShardError(e.to_string()))?;
        if records.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }
        self.cursor = records.last().map(CandidateRecord::id);
        Ok(Some(Shard::new(self.batch_id, "staging", records)))
    }
}

/// Any of these present makes a record worth staging.
fn has_essential_fields(record: &RawCandidate) -> bool {
    fn present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
    present(&record.username)
        || present(&record.primary_email)
        || present(&record.name)
        || present(&record.national_id)
}

async fn load_one(
    repository: Arc<dyn StagingRepository>,
    audit: AuditLogger,
    import: StagedImport,
) -> LoadSummary {
    let StagedImport { record, provenance } = import;
    let handle = record
        .primary_email
        .clone()
        .or_else(|| record.username.clone())
        .unwrap_or_else(|| "<unidentified>".to_string());

    if !has_essential_fields(&record) {
        audit
            .log(
                AuditLogType::ImportError,
                format!(
                    "record has no essential identifier (username, email, name or national id), register {}",
                    provenance.index_register
                ),
                provenance.index_register.clone(),
                provenance.file.clone(),
                provenance.batch_id,
                None,
            )
            .await;
        return LoadSummary {
            failed: 1,
            ..Default::default()
        };
    }

    match repository.create(record).await {
        Ok(created) => {
            audit
                .log(
                    AuditLogType::ImportSuccess,
                    format!("staged candidate: {handle}"),
                    provenance.index_register.clone(),
                    provenance.file.clone(),
                    provenance.batch_id,
                    Some(created.id()),
                )
                .await;
            LoadSummary {
                created: 1,
                ..Default::default()
            }
        }
        Err(e) if e.is_unique_violation() => {
            audit
                .log(
                    AuditLogType::Ignored,
                    format!("candidate already staged: {handle}"),
                    provenance.index_register.clone(),
                    provenance.file.clone(),
                    provenance.batch_id,
                    None,
                )
                .await;
            LoadSummary {
                ignored: 1,
                ..Default::default()
            }
        }
        Err(e) => {
            audit
                .log(
                    AuditLogType::ImportError,
                    format!("failed to stage {handle}: {e}"),
                    provenance.index_register.clone(),
                    provenance.file.clone(),
                    provenance.batch_id,
                    None,
                )
                .await;
            LoadSummary {
                failed: 1,
                ..Default::default()
            }
        }
    }
}
