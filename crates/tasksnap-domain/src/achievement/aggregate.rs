use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::criteria::AchievementCriteria;
use crate::shared::{AchievementId, DomainError};

/// Catalog grouping tag, used for querying related achievements together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementGroup {
    Milestones,
    Consistency,
    TimeOfDay,
    Categories,
    Special,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    id: AchievementId,
    title: String,
    group: AchievementGroup,
    criteria: AchievementCriteria,
    unlocked: bool,
    unlocked_at: Option<DateTime<Utc>>,
    progress: f64,
}

impl Achievement {
    /// A locked catalog entry at progress 0.
    pub fn new(
        id: AchievementId,
        title: impl Into<String>,
        group: AchievementGroup,
        criteria: AchievementCriteria,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            group,
            criteria,
            unlocked: false,
            unlocked_at: None,
            progress: 0.0,
        }
    }

    pub fn restore(
        id: AchievementId,
        title: String,
        group: AchievementGroup,
        criteria: AchievementCriteria,
        unlocked: bool,
        unlocked_at: Option<DateTime<Utc>>,
        progress: f64,
    ) -> Self {
        Self {
            id,
            title,
            group,
            criteria,
            unlocked,
            unlocked_at,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    pub fn id(&self) -> &AchievementId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group(&self) -> AchievementGroup {
        self.group
    }

    pub fn criteria(&self) -> &AchievementCriteria {
        &self.criteria
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether this entry waits on a historical data source and therefore
    /// can never unlock from a single snapshot.
    pub fn is_pending_signal(&self) -> bool {
        self.criteria.requires_historical_signal()
    }

    /// Update the progress fraction of a still-locked achievement. Progress of
    /// an unlocked achievement is frozen; later shrinkage of the task set must
    /// not resurrect stale fractions.
    pub fn record_progress(&mut self, progress: f64) -> Result<(), DomainError> {
        if self.unlocked {
            return Err(DomainError::Validation(format!(
                "Achievement {} is unlocked; progress is frozen",
                self.id
            )));
        }
        self.progress = progress.clamp(0.0, 1.0);
        Ok(())
    }

    /// Transition to unlocked, exactly once. `unlocked_at` is stamped here and
    /// never touched again; progress is forced to 1.0.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.unlocked {
            return Err(DomainError::DataIntegrity(format!(
                "Achievement {} is already unlocked",
                self.id
            )));
        }
        self.unlocked = true;
        self.unlocked_at = Some(now);
        self.progress = 1.0;
        Ok(())
    }

    /// Overlay persisted unlock/progress state onto this canonical entry.
    pub fn apply_persisted(
        &mut self,
        unlocked: bool,
        unlocked_at: Option<DateTime<Utc>>,
        progress: f64,
    ) {
        self.unlocked = unlocked;
        self.unlocked_at = if unlocked { unlocked_at } else { None };
        self.progress = if unlocked { 1.0 } else { progress.clamp(0.0, 1.0) };
    }
}
