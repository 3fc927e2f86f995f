use serde::{Deserialize, Serialize};

use crate::task::TaskCategory;

/// Closed set of unlock rules. Each counted variant carries its target so an
/// exhaustive match is the only way to evaluate one; adding a variant fails
/// compilation everywhere a rule is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementCriteria {
    /// Consecutive-day completion streak of at least `days`.
    Streak { days: u32 },
    /// Total completed tasks.
    TasksCompleted { count: u32 },
    /// Completed tasks within one category.
    TasksInCategory { category: TaskCategory, count: u32 },
    /// Tasks completed before 10:00.
    MorningTasks { count: u32 },
    /// Tasks completed at or after 20:00.
    EveningTasks { count: u32 },
    /// Tasks completed within minutes of creation. Pending-signal: needs
    /// creation-to-completion deltas tracked over time.
    QuickCompleter { count: u32 },
    /// Days with the app opened in a row. Pending-signal: needs a daily
    /// app-open log.
    ConsecutiveDays { count: u32 },
    /// Before/after photo pairs captured. Pending-signal: needs the photo
    /// capture history.
    PhotosTaken { count: u32 },
    /// Completed tasks flagged urgent.
    UrgentTasks { count: u32 },
    /// Tasks on both weekend days. Pending-signal: needs per-day tallies.
    WeekendWarrior,
    /// Every planned task done seven days running. Pending-signal: needs
    /// per-day completion tallies.
    PerfectWeek,
    /// Distinct categories with at least one completion.
    CategoryVariety { count: u32 },
    /// A single task worked for `hours` or more. Pending-signal: needs task
    /// lifetime tracking.
    LongTask { hours: u32 },
    /// Any task completed before 07:00.
    EarlyBird,
    /// Any task completed at or after 23:00.
    NightOwl,
    /// `count` tasks completed in one sitting. Pending-signal: needs
    /// session-scoped completion bursts.
    BulkComplete { count: u32 },
}

impl AchievementCriteria {
    /// Rules that cannot be derived from a single task snapshot. They stay at
    /// progress 0 and never unlock until the historical data source exists;
    /// callers surface them as pending rather than silently broken.
    pub fn requires_historical_signal(&self) -> bool {
        matches!(
            self,
            AchievementCriteria::QuickCompleter { .. }
                | AchievementCriteria::ConsecutiveDays { .. }
                | AchievementCriteria::PhotosTaken { .. }
                | AchievementCriteria::WeekendWarrior
                | AchievementCriteria::PerfectWeek
                | AchievementCriteria::LongTask { .. }
                | AchievementCriteria::BulkComplete { .. }
        )
    }

    /// The count/threshold denominator, where the variant has one. Catalog
    /// seeding validates these are never zero.
    pub fn target(&self) -> Option<u32> {
        match self {
            AchievementCriteria::Streak { days } => Some(*days),
            AchievementCriteria::TasksCompleted { count }
            | AchievementCriteria::TasksInCategory { count, .. }
            | AchievementCriteria::MorningTasks { count }
            | AchievementCriteria::EveningTasks { count }
            | AchievementCriteria::QuickCompleter { count }
            | AchievementCriteria::ConsecutiveDays { count }
            | AchievementCriteria::PhotosTaken { count }
            | AchievementCriteria::UrgentTasks { count }
            | AchievementCriteria::CategoryVariety { count }
            | AchievementCriteria::BulkComplete { count } => Some(*count),
            AchievementCriteria::LongTask { hours } => Some(*hours),
            AchievementCriteria::WeekendWarrior
            | AchievementCriteria::PerfectWeek
            | AchievementCriteria::EarlyBird
            | AchievementCriteria::NightOwl => None,
        }
    }
}
