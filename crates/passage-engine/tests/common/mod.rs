//! In-memory test doubles for the engine's repository contracts and
//! the remote identity service.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use passage_domain::{CandidateRecord, RawCandidate};
use passage_engine::{
    AuditError, AuditLogEntry, AuditLogRepository, NewAuditLogEntry, Shard, ShardError,
    ShardSource, StagingError, StagingRepository,
};
use passage_identity_client::{
    IdentityClientError, IdentityClientResult, IdentityServiceClient, NewIdentity, RemoteIdentity,
};

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

/// Append-only audit store backed by a vector.
#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: Mutex<Vec<AuditLogEntry>>,
    next_id: AtomicI64,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().expect("audit lock").clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn create(&self, entry: NewAuditLogEntry) -> Result<AuditLogEntry, AuditError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let persisted = AuditLogEntry {
            id,
            entry_type: entry.entry_type,
            message: entry.message,
            index_register: entry.index_register,
            file: entry.file,
            batch_id: entry.batch_id,
            user_id: entry.user_id,
            created_at: Utc::now(),
        };
        self.entries
            .lock()
            .expect("audit lock")
            .push(persisted.clone());
        Ok(persisted)
    }
}

// ---------------------------------------------------------------------------
// Remote identity service
// ---------------------------------------------------------------------------

/// How the scripted remote behaves for one email.
#[derive(Debug, Clone)]
pub enum RemoteBehavior {
    /// Create succeeds with a generated id.
    CreateOk,
    /// Create conflicts; the identity already exists under this id.
    ConflictExisting(String),
    /// Create fails with a server error.
    ServerError,
}

/// Scripted stand-in for the remote identity service, keyed by email.
#[derive(Default)]
pub struct ScriptedIdentityClient {
    behaviors: Mutex<HashMap<String, RemoteBehavior>>,
    create_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl ScriptedIdentityClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, email: &str, behavior: RemoteBehavior) {
        self.behaviors
            .lock()
            .expect("behavior lock")
            .insert(email.to_string(), behavior);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn behavior_for(&self, email: &str) -> RemoteBehavior {
        self.behaviors
            .lock()
            .expect("behavior lock")
            .get(email)
            .cloned()
            .unwrap_or(RemoteBehavior::CreateOk)
    }
}

#[async_trait]
impl IdentityServiceClient for ScriptedIdentityClient {
    async fn create_user(&self, payload: &NewIdentity) -> IdentityClientResult<RemoteIdentity> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let email = payload.primary_email.clone().unwrap_or_default();
        match self.behavior_for(&email) {
            RemoteBehavior::CreateOk => {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(RemoteIdentity {
                    id: format!("remote-{n}"),
                    primary_email: Some(email),
                })
            }
            RemoteBehavior::ConflictExisting(_) => Err(IdentityClientError::Conflict {
                code: "user.email_already_in_use".to_string(),
                message: "This email is associated with an existing account.".to_string(),
            }),
            RemoteBehavior::ServerError => Err(IdentityClientError::Api {
                status: 500,
                code: "internal.server_error".to_string(),
                message: "unexpected error".to_string(),
            }),
        }
    }

    async fn update_user(
        &self,
        id: &str,
        _payload: &NewIdentity,
    ) -> IdentityClientResult<RemoteIdentity> {
        Ok(RemoteIdentity {
            id: id.to_string(),
            primary_email: None,
        })
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> IdentityClientResult<Option<RemoteIdentity>> {
        match self.behavior_for(email) {
            RemoteBehavior::ConflictExisting(id) => Ok(Some(RemoteIdentity {
                id,
                primary_email: Some(email.to_string()),
            })),
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Staging store
// ---------------------------------------------------------------------------

/// Staging store backed by a vector, with a unique constraint on
/// username.
#[derive(Default)]
pub struct InMemoryStaging {
    records: Mutex<Vec<CandidateRecord>>,
    next_id: AtomicI64,
}

impl InMemoryStaging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CandidateRecord> {
        self.records.lock().expect("staging lock").clone()
    }
}

#[async_trait]
impl StagingRepository for InMemoryStaging {
    async fn find_many(
        &self,
        take: usize,
        cursor: Option<i64>,
    ) -> Result<Vec<CandidateRecord>, StagingError> {
        let records = self.records.lock().expect("staging lock");
        Ok(records
            .iter()
            .filter(|r| cursor.is_none_or(|c| r.id() > c))
            .take(take)
            .cloned()
            .collect())
    }

    async fn create(&self, record: RawCandidate) -> Result<CandidateRecord, StagingError> {
        let mut records = self.records.lock().expect("staging lock");
        if let Some(username) = record.username.as_deref() {
            let username = username.trim();
            if !username.is_empty()
                && records.iter().any(|r| r.username().as_str() == username)
            {
                return Err(StagingError::UniqueViolation {
                    field: "username".to_string(),
                });
            }
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = CandidateRecord::new(id, record);
        records.push(created.clone());
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// Shard source
// ---------------------------------------------------------------------------

/// Shard source over a fixed queue of results.
pub struct QueuedShardSource {
    shards: VecDeque<Result<Shard, ShardError>>,
}

impl QueuedShardSource {
    pub fn new(shards: Vec<Result<Shard, ShardError>>) -> Self {
        Self {
            shards: shards.into(),
        }
    }
}

#[async_trait]
impl ShardSource for QueuedShardSource {
    async fn next_shard(&mut self) -> Result<Option<Shard>, ShardError> {
        match self.shards.pop_front() {
            Some(Ok(shard)) => Ok(Some(shard)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}
