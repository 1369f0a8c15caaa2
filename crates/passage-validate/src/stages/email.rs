//! Email stage. The email is the join key with the remote identity
//! service, so any problem here is fatal.

use crate::context::ValidationContext;
use crate::issue::ErrorKind;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::{CandidateRecord, EmailOptions};

pub struct EmailValidator {
    options: EmailOptions,
}

impl EmailValidator {
    #[must_use]
    pub fn new(options: EmailOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Validator for EmailValidator {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let email = record.primary_email();

        if email.is_empty() {
            ctx.error(ErrorKind::Email, "email required");
            return;
        }

        if !email.is_format_valid() {
            ctx.error(
                ErrorKind::Email,
                format!("invalid email format: \"{email}\""),
            );
            return;
        }

        if !email.is_allowed_domain(&self.options.allowed_domains) {
            ctx.error(
                ErrorKind::Email,
                format!("email domain not allowed: \"{}\"", email.domain().unwrap_or("")),
            );
            return;
        }

        if !email.is_not_blocked_domain(&self.options.blocked_domains) {
            ctx.error(
                ErrorKind::Email,
                format!("email domain blocked: \"{}\"", email.domain().unwrap_or("")),
            );
            return;
        }

        ctx.flags.email = true;
        ctx.log("valid email");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_domain::RawCandidate;

    fn record(email: Option<&str>) -> CandidateRecord {
        CandidateRecord::new(
            1,
            RawCandidate {
                primary_email: email.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn missing_email_is_fatal() {
        let mut ctx = ValidationContext::new();
        EmailValidator::new(EmailOptions::default())
            .apply(&record(None), &mut ctx)
            .await;
        assert!(ctx.has_error(ErrorKind::Email));
        assert_eq!(ctx.errors[0].message, "email required");
        assert!(!ctx.flags.email);
    }

    #[tokio::test]
    async fn malformed_email_is_fatal() {
        let mut ctx = ValidationContext::new();
        EmailValidator::new(EmailOptions::default())
            .apply(&record(Some("not-an-email")), &mut ctx)
            .await;
        assert!(ctx.has_error(ErrorKind::Email));
    }

    #[tokio::test]
    async fn valid_email_sets_flag() {
        let mut ctx = ValidationContext::new();
        EmailValidator::new(EmailOptions::default())
            .apply(&record(Some("a@b.com")), &mut ctx)
            .await;
        assert!(ctx.is_importable());
        assert!(ctx.flags.email);
    }

    #[tokio::test]
    async fn blocked_domain_is_fatal() {
        let options = EmailOptions {
            blocked_domains: vec!["spam.example".to_string()],
            ..Default::default()
        };
        let mut ctx = ValidationContext::new();
        EmailValidator::new(options)
            .apply(&record(Some("a@spam.example")), &mut ctx)
            .await;
        assert!(ctx.has_error(ErrorKind::Email));
    }
}
