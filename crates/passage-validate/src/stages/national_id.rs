//! National id stage. Soft on every finding — the id is a secondary
//! identifier for the remote service.

use crate::context::ValidationContext;
use crate::validator::Validator;
use async_trait::async_trait;
use passage_domain::CandidateRecord;

pub struct NationalIdValidator;

#[async_trait]
impl Validator for NationalIdValidator {
    fn name(&self) -> &'static str {
        "national_id"
    }

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext) {
        let id = record.national_id();

        if id.is_empty() {
            ctx.log("national id missing");
            return;
        }

        if !id.is_format_valid() {
            ctx.log(format!("invalid national id: \"{id}\""));
            return;
        }

        ctx.flags.national_id = true;
        ctx.log(format!("valid national id: {}", id.format()));
    }
}
