//! Password stage. Credentials are optional at import time (the
//! identity service can run a recovery flow), so every finding is soft.

use crate::context::ValidationContext;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::{CandidateRecord, CredentialOptions};

pub struct PasswordValidator {
    options: CredentialOptions,
}

impl PasswordValidator {
    #[must_use]
    pub fn new(options: CredentialOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Validator for PasswordValidator {
    fn name(&self) -> &'static str {
        "password"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let credential = record.credential();

        if credential.is_empty() {
            ctx.log("password missing");
            return;
        }

        if credential.raw().is_some() {
            if !credential.is_raw_valid(self.options.min_length, self.options.max_length) {
                ctx.log(format!(
                    "password length out of bounds ({}..={} characters)",
                    self.options.min_length, self.options.max_length
                ));
                return;
            }
        } else {
            if !credential.is_digest_valid() {
                ctx.log("password digest too long");
                return;
            }
            if !credential.has_supported_algorithm() {
                ctx.log(format!(
                    "unsupported password algorithm: \"{}\"",
                    credential.algorithm().unwrap_or("")
                ));
                return;
            }
        }

        ctx.flags.password = true;
        ctx.log("valid password");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_domain::RawCandidate;

    fn record(raw: RawCandidate) -> CandidateRecord {
        CandidateRecord::new(1, raw)
    }

    #[tokio::test]
    async fn empty_password_is_soft() {
        let mut ctx = ValidationContext::new();
        PasswordValidator::new(CredentialOptions::default())
            .apply(&record(RawCandidate::default()), &mut ctx)
            .await;
        assert!(ctx.is_importable());
        assert!(ctx.logs.iter().any(|l| l.contains("password missing")));
    }

    #[tokio::test]
    async fn short_raw_password_is_soft() {
        let mut ctx = ValidationContext::new();
        PasswordValidator::new(CredentialOptions::default())
            .apply(
                &record(RawCandidate {
                    password: Some("abc".to_string()),
                    ..Default::default()
                }),
                &mut ctx,
            )
            .await;
        assert!(ctx.is_importable());
        assert!(!ctx.flags.password);
    }

    #[tokio::test]
    async fn digest_with_unknown_algorithm_is_soft() {
        let mut ctx = ValidationContext::new();
        PasswordValidator::new(CredentialOptions::default())
            .apply(
                &record(RawCandidate {
                    password_digest: Some("abcdef".to_string()),
                    password_algorithm: Some("rot13".to_string()),
                    ..Default::default()
                }),
                &mut ctx,
            )
            .await;
        assert!(ctx.is_importable());
        assert!(!ctx.flags.password);
        assert!(
            ctx.logs
                .iter()
                .any(|l| l.contains("unsupported password algorithm"))
        );
    }

    #[tokio::test]
    async fn valid_digest_sets_flag() {
        let mut ctx = ValidationContext::new();
        PasswordValidator::new(CredentialOptions::default())
            .apply(
                &record(RawCandidate {
                    password_digest: Some("$2b$10$abc".to_string()),
                    password_algorithm: Some("Bcrypt".to_string()),
                    ..Default::default()
                }),
                &mut ctx,
            )
            .await;
        assert!(ctx.flags.password);
    }
}
