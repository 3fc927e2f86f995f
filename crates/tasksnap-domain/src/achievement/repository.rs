use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AchievementId, DomainError};

/// The fixed persistence schema for one achievement. Titles, groups and
/// criteria are catalog data and never persisted; only earned state is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementStateRecord {
    pub id: AchievementId,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: f64,
}

/// Achievement state repository trait
#[async_trait]
pub trait AchievementStateRepository: Send + Sync {
    /// Load all persisted achievement state records. Corrupt rows are skipped
    /// with a warning; a fresh install yields an empty list.
    async fn load_all(&self) -> Result<Vec<AchievementStateRecord>, DomainError>;

    /// Persist the full achievement state set
    async fn save_all(&self, records: &[AchievementStateRecord]) -> Result<(), DomainError>;
}
