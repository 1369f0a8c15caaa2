//! Duplicate-check stage. Assembled into the pipeline only when a
//! remote client is configured.
//!
//! A remote hit blocks import; a miss (or an explicit not-found) is
//! fine. Any other lookup failure is logged but does not block — the
//! importer discovers a true conflict at creation time anyway.

use crate::context::ValidationContext;
use crate::issue::ErrorKind;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::CandidateRecord;
use passage_identity_client::IdentityServiceClient;
use std::sync::Arc;
use tracing::warn;

pub struct DuplicateValidator {
    client: Arc<dyn IdentityServiceClient>,
}

impl DuplicateValidator {
    #[must_use]
    pub fn new(client: Arc<dyn IdentityServiceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Validator for DuplicateValidator {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let email = record.primary_email();

        if email.is_empty() {
            ctx.log("email missing - duplicate check skipped");
            return;
        }

        match self.client.find_user_by_email(email.as_str()).await {
            Ok(Some(existing)) => {
                ctx.error(
                    ErrorKind::AlreadyExists,
                    format!(
                        "identity already exists remotely: {} (id: {})",
                        email, existing.id
                    ),
                );
                ctx.log(format!("duplicate detected - remote id {}", existing.id));
            }
            Ok(None) => {
                ctx.log("no remote identity found - clear to import");
            }
            Err(e) if e.is_not_found() => {
                ctx.log("no remote identity found - clear to import");
            }
            Err(e) => {
                warn!(record_id = record.id(), error = %e, "duplicate check failed");
                ctx.log(format!("duplicate check failed: {e}"));
            }
        }
    }
}
