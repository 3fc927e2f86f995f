use serde::{Deserialize, Serialize};

use tasksnap_domain::achievement::{Achievement, AchievementGroup};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDto {
    pub id: String,
    pub title: String,
    pub group: String,
    pub unlocked: bool,
    pub unlocked_at: Option<String>, // RFC 3339
    pub progress: f64,
    /// Waits on a historical data source; shown as pending, never unlockable
    /// from the current snapshot.
    pub pending_signal: bool,
}

fn group_name(group: AchievementGroup) -> &'static str {
    match group {
        AchievementGroup::Milestones => "milestones",
        AchievementGroup::Consistency => "consistency",
        AchievementGroup::TimeOfDay => "time_of_day",
        AchievementGroup::Categories => "categories",
        AchievementGroup::Special => "special",
    }
}

impl From<&Achievement> for AchievementDto {
    fn from(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id().to_string(),
            title: achievement.title().to_string(),
            group: group_name(achievement.group()).to_string(),
            unlocked: achievement.is_unlocked(),
            unlocked_at: achievement.unlocked_at().map(|at| at.to_rfc3339()),
            progress: achievement.progress(),
            pending_signal: achievement.is_pending_signal(),
        }
    }
}
