//! Phone stage. A missing phone is a soft finding; a phone that is
//! present but malformed blocks import.

use crate::context::ValidationContext;
use crate::issue::ErrorKind;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::{CandidateRecord, PhoneOptions};

pub struct PhoneValidator {
    options: PhoneOptions,
}

impl PhoneValidator {
    #[must_use]
    pub fn new(options: PhoneOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Validator for PhoneValidator {
    fn name(&self) -> &'static str {
        "phone"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let phone = record.primary_phone();

        if phone.is_empty() {
            ctx.log("phone missing");
            return;
        }

        if !phone.is_format_valid() {
            ctx.error(
                ErrorKind::Phone,
                format!(
                    "invalid phone: \"{}\" - must have 8 to 15 digits",
                    phone.original()
                ),
            );
            return;
        }

        if !phone.is_allowed_calling_code(&self.options.allowed_calling_codes) {
            ctx.log(format!(
                "calling code not allowed: \"{}\"",
                phone.calling_code().unwrap_or("")
            ));
            return;
        }

        if !phone.is_not_blocked_calling_code(&self.options.blocked_calling_codes) {
            ctx.log(format!(
                "calling code blocked: \"{}\"",
                phone.calling_code().unwrap_or("")
            ));
            return;
        }

        ctx.flags.phone = true;
        ctx.log(format!("valid phone: {phone}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_domain::RawCandidate;

    fn record(phone: Option<&str>) -> CandidateRecord {
        CandidateRecord::new(
            1,
            RawCandidate {
                primary_phone: phone.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn missing_phone_is_soft() {
        let mut ctx = ValidationContext::new();
        PhoneValidator::new(PhoneOptions::default())
            .apply(&record(None), &mut ctx)
            .await;
        assert!(ctx.is_importable());
        assert!(ctx.logs.iter().any(|l| l.contains("phone missing")));
    }

    #[tokio::test]
    async fn present_but_malformed_is_fatal() {
        let mut ctx = ValidationContext::new();
        PhoneValidator::new(PhoneOptions::default())
            .apply(&record(Some("abc")), &mut ctx)
            .await;
        assert!(ctx.has_error(ErrorKind::Phone));
        assert!(!ctx.flags.phone);
    }

    #[tokio::test]
    async fn valid_phone_sets_flag() {
        let mut ctx = ValidationContext::new();
        PhoneValidator::new(PhoneOptions::default())
            .apply(&record(Some("+55 11 91234-5678")), &mut ctx)
            .await;
        assert!(ctx.is_importable());
        assert!(ctx.flags.phone);
    }

    #[tokio::test]
    async fn blocked_calling_code_is_soft() {
        let options = PhoneOptions {
            blocked_calling_codes: vec!["55".to_string()],
            ..Default::default()
        };
        let mut ctx = ValidationContext::new();
        PhoneValidator::new(options)
            .apply(&record(Some("5511912345678")), &mut ctx)
            .await;
        assert!(ctx.is_importable());
        assert!(!ctx.flags.phone);
        assert!(ctx.logs.iter().any(|l| l.contains("calling code blocked")));
    }
}
