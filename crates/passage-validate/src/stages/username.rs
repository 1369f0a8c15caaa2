//! Username stage. All findings are soft — the remote identity service
//! can mint identities without a username.

use crate::context::ValidationContext;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::{CandidateRecord, UsernameOptions};

pub struct UsernameValidator {
    options: UsernameOptions,
}

impl UsernameValidator {
    #[must_use]
    pub fn new(options: UsernameOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Validator for UsernameValidator {
    fn name(&self) -> &'static str {
        "username"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let username = record.username();

        if username.is_empty() {
            ctx.log("username missing");
            return;
        }

        if !username.is_length_valid(self.options.min_length, None) {
            ctx.log("username too short");
            return;
        }

        if !username.is_length_valid(None, self.options.max_length) {
            ctx.log("username too long");
            return;
        }

        if !username.is_format_valid() {
            ctx.log(format!("invalid username format: \"{username}\""));
            return;
        }

        if username.is_email_format() {
            ctx.log(format!("username must not be an email: \"{username}\""));
            return;
        }

        ctx.flags.username = true;
        ctx.log("valid username");
    }
}
