use async_trait::async_trait;

use super::aggregate::StreakState;
use crate::shared::DomainError;

/// Streak state repository trait
#[async_trait]
pub trait StreakStateRepository: Send + Sync {
    /// Load the persisted streak state. A missing or corrupt row yields a
    /// zeroed state, never an error that would block startup.
    async fn load(&self) -> Result<StreakState, DomainError>;

    /// Persist the streak state
    async fn save(&self, state: &StreakState) -> Result<(), DomainError>;
}
