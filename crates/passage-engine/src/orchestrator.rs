//! Batch orchestrator: drives Validate → Import per record under a
//! bounded worker pool.
//!
//! Shards are processed in order so audit numbering stays
//! deterministic; records inside the concurrency window complete in any
//! order. There is no cancellation path: every scheduled record runs to
//! a terminal outcome (success or caught failure) so the audit trail is
//! always complete.

use crate::audit::{AuditLogType, AuditLogger};
use crate::shard::{Provenance, Shard, ShardSource};
use passage_domain::CandidateRecord;
use passage_identity_client::{ImportOutcome, Importer};
use passage_validate::ValidationPipeline;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Default per-shard worker budget.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Aggregate counts for a run. `skipped` counts validation rejections;
/// `failed` counts import-stage failures on otherwise-valid candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub imported: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn merge(&mut self, other: BatchSummary) {
        self.imported += other.imported;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Terminal outcome of one record's pipeline pass.
enum RecordOutcome {
    Imported,
    Failed,
    Skipped,
}

/// Drives many candidates through validation and import.
pub struct BatchOrchestrator {
    pipeline: Arc<ValidationPipeline>,
    importer: Arc<Importer>,
    audit: AuditLogger,
    concurrency: usize,
}

impl BatchOrchestrator {
    #[must_use]
    pub fn new(
        pipeline: Arc<ValidationPipeline>,
        importer: Arc<Importer>,
        audit: AuditLogger,
        concurrency: usize,
    ) -> Self {
        Self {
            pipeline,
            importer,
            audit,
            concurrency: concurrency.max(1),
        }
    }

    /// Process every shard the source yields, in order. A shard that
    /// cannot be read is logged and skipped; it never aborts the run.
    pub async fn run(&self, source: &mut dyn ShardSource) -> BatchSummary {
        let mut summary = BatchSummary::default();
        loop {
            match source.next_shard().await {
                Ok(Some(shard)) => summary.merge(self.run_shard(&shard).await),
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "shard read failed, skipping shard");
                }
            }
        }
        info!(
            imported = summary.imported,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch run finished"
        );
        summary
    }

    /// Process one shard under the worker pool. The index register is
    /// assigned from the record's position before any task is spawned,
    /// so it is stable regardless of completion order.
    pub async fn run_shard(&self, shard: &Shard) -> BatchSummary {
        info!(
            batch_id = %shard.batch_id,
            file = %shard.file,
            records = shard.len(),
            "processing shard"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set: JoinSet<RecordOutcome> = JoinSet::new();

        for (index, record) in shard.records.iter().enumerate() {
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let pipeline = self.pipeline.clone();
            let importer = self.importer.clone();
            let audit = self.audit.clone();
            let record = record.clone();
            let provenance = shard.provenance(index);

            join_set.spawn(async move {
                let _permit = permit;
                process_record(pipeline, importer, audit, record, provenance).await
            });
        }

        let mut summary = BatchSummary::default();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(RecordOutcome::Imported) => summary.imported += 1,
                Ok(RecordOutcome::Failed) => summary.failed += 1,
                Ok(RecordOutcome::Skipped) => summary.skipped += 1,
                Err(e) => {
                    // A panicked task still counts against the batch;
                    // its siblings keep running.
                    error!(batch_id = %shard.batch_id, error = %e, "record task aborted");
                    summary.failed += 1;
                }
            }
        }

        info!(
            batch_id = %shard.batch_id,
            file = %shard.file,
            imported = summary.imported,
            failed = summary.failed,
            skipped = summary.skipped,
            "shard finished"
        );
        summary
    }

    /// Validate a shard without importing, writing one
    /// validation-success or validation-error entry per record.
    pub async fn validate_shard(&self, shard: &Shard) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for (index, record) in shard.records.iter().enumerate() {
            let provenance = shard.provenance(index);
            let ctx = self.pipeline.run(record).await;
            if ctx.is_importable() {
                self.audit
                    .log(
                        AuditLogType::ValidationSuccess,
                        format!("candidate valid: {}", record.display_handle()),
                        provenance.index_register,
                        provenance.file,
                        provenance.batch_id,
                        Some(record.id()),
                    )
                    .await;
                summary.imported += 1;
            } else {
                self.audit
                    .log(
                        AuditLogType::ValidationError,
                        ctx.error_summary(),
                        provenance.index_register,
                        provenance.file,
                        provenance.batch_id,
                        Some(record.id()),
                    )
                    .await;
                summary.skipped += 1;
            }
        }
        summary
    }
}

/// One record's full pass: validate, then import when clean. Exactly
/// one audit entry is written whatever happens.
async fn process_record(
    pipeline: Arc<ValidationPipeline>,
    importer: Arc<Importer>,
    audit: AuditLogger,
    record: CandidateRecord,
    provenance: Provenance,
) -> RecordOutcome {
    let ctx = pipeline.run(&record).await;

    if !ctx.is_importable() {
        warn!(
            record_id = record.id(),
            handle = %record.display_handle(),
            errors = %ctx.error_summary(),
            "candidate rejected by validation"
        );
        audit
            .log(
                AuditLogType::ValidationError,
                ctx.error_summary(),
                provenance.index_register,
                provenance.file,
                provenance.batch_id,
                Some(record.id()),
            )
            .await;
        return RecordOutcome::Skipped;
    }

    match importer.import(&record).await {
        ImportOutcome::Created(remote_id) => {
            audit
                .log(
                    AuditLogType::ImportSuccess,
                    format!(
                        "identity created: {} (remote id: {remote_id})",
                        record.display_handle()
                    ),
                    provenance.index_register,
                    provenance.file,
                    provenance.batch_id,
                    Some(record.id()),
                )
                .await;
            RecordOutcome::Imported
        }
        ImportOutcome::Updated(remote_id) => {
            audit
                .log(
                    AuditLogType::ImportSuccess,
                    format!(
                        "identity updated: {} (remote id: {remote_id})",
                        record.display_handle()
                    ),
                    provenance.index_register,
                    provenance.file,
                    provenance.batch_id,
                    Some(record.id()),
                )
                .await;
            RecordOutcome::Imported
        }
        ImportOutcome::Failed(failure) => {
            audit
                .log(
                    AuditLogType::ImportError,
                    format!(
                        "import failed for {}: {}",
                        record.display_handle(),
                        failure.message
                    ),
                    provenance.index_register,
                    provenance.file,
                    provenance.batch_id,
                    Some(record.id()),
                )
                .await;
            RecordOutcome::Failed
        }
    }
}
