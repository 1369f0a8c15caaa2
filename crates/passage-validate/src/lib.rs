//! Rule-based validation pipeline for staged candidate records.
//!
//! The pipeline is an ordered, fixed list of stages. Every stage runs
//! for every candidate — the job is to report the complete set of
//! problems in one pass, not just the first — and each stage records
//! its findings into a shared [`ValidationContext`]. A candidate is
//! importable iff the context holds no fatal issues after the full
//! chain.

pub mod context;
pub mod issue;
pub mod pipeline;
pub mod report;
pub mod stages;
pub mod validator;

pub use context::{ValidationContext, ValidationFlags};
pub use issue::{ErrorKind, ValidationIssue};
pub use pipeline::{PipelineOptions, ValidationPipeline};
pub use report::{RecordIssues, ValidationReport};
pub use validator::Validator;
