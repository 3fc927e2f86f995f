use async_trait::async_trait;

use super::record::TaskRecord;
use crate::shared::DomainError;

/// Source of task snapshots for evaluation
#[async_trait]
pub trait TaskSnapshotSource: Send + Sync {
    /// Materialize an immutable copy of all task records. The returned
    /// collection is owned by the caller and never mutated concurrently
    /// mid-evaluation.
    async fn snapshot(&self) -> Result<Vec<TaskRecord>, DomainError>;
}
