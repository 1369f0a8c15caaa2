//! Aggregated validation report for a batch.

use crate::issue::{ErrorKind, ValidationIssue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fatal issues for one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordIssues {
    pub record_id: i64,
    pub issues: Vec<ValidationIssue>,
}

/// Batch-level validation summary, aggregated by structured error kind.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub errors_by_kind: BTreeMap<ErrorKind, usize>,
    pub details: Vec<RecordIssues>,
}

impl ValidationReport {
    /// Percentage of records that passed, for log lines.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.valid as f64 / self.total as f64) * 100.0
    }
}
