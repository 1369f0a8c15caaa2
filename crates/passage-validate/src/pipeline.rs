//! The validation pipeline: an ordered, fixed chain of stages.

use crate::context::ValidationContext;
use crate::report::{RecordIssues, ValidationReport};
use crate::stages::{
    AggregateValidator, DuplicateValidator, EmailValidator, NationalIdValidator,
    PasswordValidator, PhoneValidator, ProfileValidator, UsernameValidator,
};
use crate::validator::Validator;
use passage_domain::{
    CandidateRecord, CredentialOptions, EmailOptions, PhoneOptions, UsernameOptions,
};
use passage_identity_client::IdentityServiceClient;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Per-stage options for pipeline assembly.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub email: EmailOptions,
    pub phone: PhoneOptions,
    pub username: UsernameOptions,
    pub credential: CredentialOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            email: EmailOptions::default(),
            phone: PhoneOptions::default(),
            username: UsernameOptions {
                min_length: Some(3),
                max_length: Some(20),
                ..Default::default()
            },
            credential: CredentialOptions::default(),
        }
    }
}

/// Runs every candidate through the full stage chain and reads the
/// accept/reject decision off the populated context.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn Validator>>,
}

impl ValidationPipeline {
    /// Pipeline without the remote duplicate check.
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Self::assemble(options, None)
    }

    /// Pipeline with the duplicate-check stage against the given
    /// remote client.
    #[must_use]
    pub fn with_duplicate_check(
        options: PipelineOptions,
        client: Arc<dyn IdentityServiceClient>,
    ) -> Self {
        Self::assemble(options, Some(client))
    }

    /// The stage list is fixed at construction; the duplicate check is
    /// either in the chain or absent, never a runtime null check.
    fn assemble(
        options: PipelineOptions,
        duplicate_client: Option<Arc<dyn IdentityServiceClient>>,
    ) -> Self {
        let mut stages: Vec<Box<dyn Validator>> = vec![
            Box::new(EmailValidator::new(options.email)),
            Box::new(PhoneValidator::new(options.phone)),
            Box::new(UsernameValidator::new(options.username)),
            Box::new(PasswordValidator::new(options.credential)),
            Box::new(NationalIdValidator),
        ];
        if let Some(client) = duplicate_client {
            stages.push(Box::new(DuplicateValidator::new(client)));
        }
        stages.push(Box::new(ProfileValidator));
        stages.push(Box::new(AggregateValidator));
        Self { stages }
    }

    /// Run one candidate through every stage, unconditionally.
    pub async fn run(&self, record: &CandidateRecord) -> ValidationContext {
        let mut ctx = ValidationContext::new();
        for stage in &self.stages {
            stage.apply(record, &mut ctx).await;
            debug!(
                record_id = record.id(),
                stage = stage.name(),
                errors = ctx.errors.len(),
                "validation stage applied"
            );
        }
        ctx
    }

    /// Run a batch; contexts come back aligned with the input order.
    pub async fn run_batch(&self, records: &[CandidateRecord]) -> Vec<ValidationContext> {
        let mut contexts = Vec::with_capacity(records.len());
        for record in records {
            contexts.push(self.run(record).await);
        }
        contexts
    }

    /// Partition a batch into importable records and rejected records
    /// with their contexts.
    pub async fn filter_valid<'a>(
        &self,
        records: &'a [CandidateRecord],
    ) -> (
        Vec<&'a CandidateRecord>,
        Vec<(&'a CandidateRecord, ValidationContext)>,
    ) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();
        for record in records {
            let ctx = self.run(record).await;
            if ctx.is_importable() {
                valid.push(record);
            } else {
                invalid.push((record, ctx));
            }
        }
        (valid, invalid)
    }

    /// Aggregate error counts by kind across a batch, for observability.
    pub async fn report(&self, records: &[CandidateRecord]) -> ValidationReport {
        let mut errors_by_kind: BTreeMap<_, usize> = BTreeMap::new();
        let mut details = Vec::new();
        let mut valid = 0usize;

        for record in records {
            let ctx = self.run(record).await;
            if ctx.is_importable() {
                valid += 1;
            }
            for issue in &ctx.errors {
                *errors_by_kind.entry(issue.kind).or_default() += 1;
            }
            details.push(RecordIssues {
                record_id: record.id(),
                issues: ctx.errors,
            });
        }

        ValidationReport {
            total: records.len(),
            valid,
            invalid: records.len() - valid,
            errors_by_kind,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ErrorKind;
    use passage_domain::{RawCandidate, RawProfile};

    fn pipeline() -> ValidationPipeline {
        ValidationPipeline::new(PipelineOptions::default())
    }

    fn candidate(id: i64, raw: RawCandidate) -> CandidateRecord {
        CandidateRecord::new(id, raw)
    }

    #[tokio::test]
    async fn minimal_record_with_email_is_accepted() {
        // email present and valid, username too short, password empty:
        // the soft findings land in the logs, nothing blocks import.
        let record = candidate(
            1,
            RawCandidate {
                primary_email: Some("a@b.com".to_string()),
                username: Some("ab".to_string()),
                password: Some(String::new()),
                ..Default::default()
            },
        );
        let ctx = pipeline().run(&record).await;
        assert!(ctx.is_importable(), "errors: {:?}", ctx.errors);
        assert!(ctx.logs.iter().any(|l| l.contains("password missing")));
        assert!(ctx.logs.iter().any(|l| l.contains("username too short")));
    }

    #[tokio::test]
    async fn missing_email_rejects_despite_other_fields() {
        let record = candidate(
            1,
            RawCandidate {
                username: Some("jdoe".to_string()),
                password: Some("secret-password".to_string()),
                national_id: Some("52998224725".to_string()),
                ..Default::default()
            },
        );
        let ctx = pipeline().run(&record).await;
        assert!(!ctx.is_importable());
        assert!(ctx.has_error(ErrorKind::Email));
        assert_eq!(ctx.errors[0].message, "email required");
    }

    #[tokio::test]
    async fn malformed_phone_rejects_despite_valid_email() {
        let record = candidate(
            1,
            RawCandidate {
                primary_email: Some("a@b.com".to_string()),
                primary_phone: Some("abc".to_string()),
                ..Default::default()
            },
        );
        let ctx = pipeline().run(&record).await;
        assert!(ctx.flags.email, "email stage should still pass");
        assert!(ctx.has_error(ErrorKind::Phone));
        assert!(!ctx.is_importable());
    }

    #[tokio::test]
    async fn every_stage_runs_even_after_fatal_error() {
        // No email (fatal at stage one) plus an invalid gender: both
        // findings must be collected in one pass.
        let record = candidate(
            1,
            RawCandidate {
                profile: Some(RawProfile {
                    gender: Some("unknown".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let ctx = pipeline().run(&record).await;
        assert!(ctx.has_error(ErrorKind::Email));
        assert!(ctx.has_error(ErrorKind::Gender));
    }

    #[tokio::test]
    async fn filter_valid_partitions_on_errors() {
        let records = vec![
            candidate(
                1,
                RawCandidate {
                    primary_email: Some("a@b.com".to_string()),
                    ..Default::default()
                },
            ),
            candidate(2, RawCandidate::default()),
        ];
        let (valid, invalid) = pipeline().filter_valid(&records).await;
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id(), 1);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0.id(), 2);
    }

    #[tokio::test]
    async fn report_counts_by_kind() {
        let records = vec![
            candidate(1, RawCandidate::default()),
            candidate(
                2,
                RawCandidate {
                    primary_email: Some("a@b.com".to_string()),
                    primary_phone: Some("abc".to_string()),
                    ..Default::default()
                },
            ),
            candidate(
                3,
                RawCandidate {
                    primary_email: Some("c@d.com".to_string()),
                    ..Default::default()
                },
            ),
        ];
        let report = pipeline().report(&records).await;
        assert_eq!(report.total, 3);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 2);
        assert_eq!(report.errors_by_kind.get(&ErrorKind::Email), Some(&1));
        assert_eq!(report.errors_by_kind.get(&ErrorKind::Phone), Some(&1));
    }

    #[tokio::test]
    async fn duplicate_stage_rejects_remote_hits_when_configured() {
        use async_trait::async_trait;
        use passage_identity_client::{
            IdentityClientResult, NewIdentity, RemoteIdentity,
        };

        struct AlwaysExists;

        #[async_trait]
        impl IdentityServiceClient for AlwaysExists {
            async fn create_user(
                &self,
                _payload: &NewIdentity,
            ) -> IdentityClientResult<RemoteIdentity> {
                unreachable!("validation never creates")
            }

            async fn update_user(
                &self,
                _id: &str,
                _payload: &NewIdentity,
            ) -> IdentityClientResult<RemoteIdentity> {
                unreachable!("validation never updates")
            }

            async fn find_user_by_email(
                &self,
                email: &str,
            ) -> IdentityClientResult<Option<RemoteIdentity>> {
                Ok(Some(RemoteIdentity {
                    id: "remote-1".to_string(),
                    primary_email: Some(email.to_string()),
                }))
            }
        }

        let pipeline = ValidationPipeline::with_duplicate_check(
            PipelineOptions::default(),
            Arc::new(AlwaysExists),
        );
        let record = candidate(
            1,
            RawCandidate {
                primary_email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        );
        let ctx = pipeline.run(&record).await;
        assert!(ctx.has_error(ErrorKind::AlreadyExists));
        assert!(!ctx.is_importable());
    }

    #[tokio::test]
    async fn run_batch_is_index_aligned() {
        let records = vec![
            candidate(10, RawCandidate::default()),
            candidate(
                20,
                RawCandidate {
                    primary_email: Some("a@b.com".to_string()),
                    ..Default::default()
                },
            ),
        ];
        let contexts = pipeline().run_batch(&records).await;
        assert_eq!(contexts.len(), 2);
        assert!(!contexts[0].is_importable());
        assert!(contexts[1].is_importable());
    }
}
