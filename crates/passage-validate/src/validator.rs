//! Validator stage contract.

use crate::context::ValidationContext;
use async_trait::async_trait;
use passage_domain::CandidateRecord;

/// One rule stage in the pipeline.
///
/// Stages never fail and never short-circuit: findings — fatal or
/// informational — go into the context, and the pipeline always runs
/// the next stage regardless.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Stable stage name for tracing.
    fn name(&self) -> &'static str;

    async fn apply(&self, record: &CandidateRecord, ctx: &mut ValidationContext);
}
