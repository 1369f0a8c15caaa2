//! Idempotent create-or-update importer.
//!
//! One call per validated candidate. A create that collides with an
//! existing identity is resolved by looking the identity up by email
//! and updating it in place, so re-running the same candidate any
//! number of times converges on exactly one remote identity.

use crate::client::IdentityServiceClient;
use crate::models::{NewIdentity, PayloadDefaults};
use passage_domain::CandidateRecord;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Why an import failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFailureKind {
    /// The remote service rejected or could not serve the request.
    Remote,
    /// The service reported a conflict but the follow-up lookup found
    /// no identity under that email.
    Inconsistent,
}

/// A failed import with its upstream diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    pub kind: ImportFailureKind,
    pub message: String,
}

/// Terminal result of one importer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// A new remote identity was created.
    Created(String),
    /// An existing remote identity was detected and updated.
    Updated(String),
    /// The import failed; the record keeps its staging state.
    Failed(ImportFailure),
}

impl ImportOutcome {
    /// The remote id for non-failed outcomes.
    #[must_use]
    pub fn remote_id(&self) -> Option<&str> {
        match self {
            Self::Created(id) | Self::Updated(id) => Some(id),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Imports validated candidates into the remote identity service.
pub struct Importer {
    client: Arc<dyn IdentityServiceClient>,
    defaults: PayloadDefaults,
}

impl Importer {
    #[must_use]
    pub fn new(client: Arc<dyn IdentityServiceClient>, defaults: PayloadDefaults) -> Self {
        Self { client, defaults }
    }

    /// Import one candidate. Never retries transient failures; those
    /// surface as [`ImportOutcome::Failed`] for the orchestrator to log
    /// and move past.
    pub async fn import(&self, record: &CandidateRecord) -> ImportOutcome {
        let payload = NewIdentity::from_candidate(record, &self.defaults);

        match self.client.create_user(&payload).await {
            Ok(created) => {
                info!(
                    record_id = record.id(),
                    handle = %record.display_handle(),
                    remote_id = %created.id,
                    "identity created"
                );
                ImportOutcome::Created(created.id)
            }
            Err(e) if e.is_conflict() => {
                warn!(
                    record_id = record.id(),
                    handle = %record.display_handle(),
                    "create conflict, resolving against existing identity"
                );
                self.resolve_conflict(record, &payload).await
            }
            Err(e) => {
                error!(
                    record_id = record.id(),
                    handle = %record.display_handle(),
                    error = %e,
                    "identity create failed"
                );
                ImportOutcome::Failed(ImportFailure {
                    kind: ImportFailureKind::Remote,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Conflict path: find the existing identity by email and update it
    /// with the mutable subset of the payload.
    async fn resolve_conflict(
        &self,
        record: &CandidateRecord,
        payload: &NewIdentity,
    ) -> ImportOutcome {
        let email = record.primary_email().as_str();

        let existing = match self.client.find_user_by_email(email).await {
            Ok(found) => found,
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                error!(
                    record_id = record.id(),
                    email = %email,
                    error = %e,
                    "lookup after conflict failed"
                );
                return ImportOutcome::Failed(ImportFailure {
                    kind: ImportFailureKind::Remote,
                    message: e.to_string(),
                });
            }
        };

        let Some(existing) = existing else {
            // The service said the email is taken but cannot produce the
            // identity that holds it.
            error!(
                record_id = record.id(),
                email = %email,
                "conflict reported but no identity found under that email"
            );
            return ImportOutcome::Failed(ImportFailure {
                kind: ImportFailureKind::Inconsistent,
                message: format!(
                    "create conflict for {email} but lookup returned no identity"
                ),
            });
        };

        match self
            .client
            .update_user(&existing.id, &payload.update_payload())
            .await
        {
            Ok(_) => {
                info!(
                    record_id = record.id(),
                    remote_id = %existing.id,
                    "conflict resolved, existing identity updated"
                );
                ImportOutcome::Updated(existing.id)
            }
            Err(e) => {
                error!(
                    record_id = record.id(),
                    remote_id = %existing.id,
                    error = %e,
                    "update of existing identity failed"
                );
                ImportOutcome::Failed(ImportFailure {
                    kind: ImportFailureKind::Remote,
                    message: e.to_string(),
                })
            }
        }
    }
}
