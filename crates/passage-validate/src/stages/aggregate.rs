//! Terminal aggregator stage.
//!
//! Reads the flag map the earlier stages populated: every unset
//! optional flag becomes an informational log line, and the one hard
//! requirement is that email validated. Records with fatal issues are
//! rejected regardless of flags.

use crate::context::ValidationContext;
use crate::issue::ErrorKind;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::CandidateRecord;

pub struct AggregateValidator;

#[async_trait]
impl Validator for AggregateValidator {
    fn name(&self) -> &'static str {
        "aggregate"
    }

    async fn apply(&self, _record: &CandidateRecord, ctx: &mut ValidationContext) {
        for flag in ctx.flags.missing() {
            ctx.log(format!("[{flag}] not validated"));
        }

        if !ctx.flags.email && !ctx.has_error(ErrorKind::Email) {
            ctx.error(ErrorKind::Email, "email validation did not pass");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_domain::RawCandidate;

    fn record() -> CandidateRecord {
        CandidateRecord::new(1, RawCandidate::default())
    }

    #[tokio::test]
    async fn email_flag_is_required() {
        let mut ctx = ValidationContext::new();
        AggregateValidator.apply(&record(), &mut ctx).await;
        assert!(ctx.has_error(ErrorKind::Email));
    }

    #[tokio::test]
    async fn email_flag_alone_is_enough() {
        let mut ctx = ValidationContext::new();
        ctx.flags.email = true;
        AggregateValidator.apply(&record(), &mut ctx).await;
        assert!(ctx.is_importable());
    }

    #[tokio::test]
    async fn no_duplicate_email_error() {
        let mut ctx = ValidationContext::new();
        ctx.error(ErrorKind::Email, "email required");
        AggregateValidator.apply(&record(), &mut ctx).await;
        assert_eq!(
            ctx.errors
                .iter()
                .filter(|i| i.kind == ErrorKind::Email)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn missing_flags_are_logged() {
        let mut ctx = ValidationContext::new();
        ctx.flags.email = true;
        ctx.flags.password = true;
        AggregateValidator.apply(&record(), &mut ctx).await;
        assert!(ctx.logs.iter().any(|l| l.contains("[phone] not validated")));
        assert!(ctx.logs.iter().any(|l| l.contains("[profile] not validated")));
        assert!(!ctx.logs.iter().any(|l| l.contains("[email] not validated")));
    }
}
