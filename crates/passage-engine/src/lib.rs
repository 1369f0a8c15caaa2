//! Batch orchestration for the passage migration engine.
//!
//! Wires the validation pipeline and the idempotent importer into a
//! bounded-concurrency runner, with an append-only audit trail as the
//! record of every terminal outcome. The staging store and audit store
//! are consumed through minimal repository contracts; their concrete
//! transports live outside this workspace.

pub mod audit;
pub mod config;
pub mod orchestrator;
pub mod shard;
pub mod staging;

pub use audit::{
    AuditError, AuditLogEntry, AuditLogRepository, AuditLogType, AuditLogger, NewAuditLogEntry,
};
pub use config::{EngineConfig, IdentityServiceConfig};
pub use orchestrator::{BatchOrchestrator, BatchSummary, DEFAULT_CONCURRENCY};
pub use shard::{Provenance, Shard, ShardError, ShardSource};
pub use staging::{
    DEFAULT_STAGING_CONCURRENCY, LoadSummary, StagedImport, StagingError, StagingLoader,
    StagingRepository, StagingShardSource,
};
