//! Shards: ordered batches of candidate records with provenance.

use async_trait::async_trait;
use passage_domain::CandidateRecord;
use thiserror::Error;
use uuid::Uuid;

/// Where a record came from, for traceable audit entries.
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Stable 1-based position within the source shard.
    pub index_register: String,
    /// Source file name.
    pub file: String,
    /// Batch the shard belongs to.
    pub batch_id: Uuid,
}

/// One ordered batch of candidates sharing a batch id and source file.
#[derive(Debug, Clone)]
pub struct Shard {
    pub batch_id: Uuid,
    pub file: String,
    pub records: Vec<CandidateRecord>,
}

impl Shard {
    #[must_use]
    pub fn new(batch_id: Uuid, file: impl Into<String>, records: Vec<CandidateRecord>) -> Self {
        Self {
            batch_id,
            file: file.into(),
            records,
        }
    }

    /// Provenance for the record at `index` (0-based in, 1-based out).
    #[must_use]
    pub fn provenance(&self, index: usize) -> Provenance {
        Provenance {
            index_register: (index + 1).to_string(),
            file: self.file.clone(),
            batch_id: self.batch_id,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A shard could not be read or parsed. Aborts only that shard.
#[derive(Debug, Error)]
#[error("failed to read shard: {0}")]
pub struct ShardError(pub String);

/// An ordered sequence of shards, produced by out-of-scope file
/// ingestion.
#[async_trait]
pub trait ShardSource: Send {
    /// Next shard in order, or `None` when exhausted.
    async fn next_shard(&mut self) -> Result<Option<Shard>, ShardError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_domain::RawCandidate;

    #[test]
    fn provenance_is_one_based() {
        let shard = Shard::new(
            Uuid::new_v4(),
            "batch-1.json",
            vec![
                CandidateRecord::new(1, RawCandidate::default()),
                CandidateRecord::new(2, RawCandidate::default()),
            ],
        );
        assert_eq!(shard.provenance(0).index_register, "1");
        assert_eq!(shard.provenance(1).index_register, "2");
        assert_eq!(shard.provenance(0).file, "batch-1.json");
    }
}
