use log::warn;

use super::aggregate::{Achievement, AchievementGroup};
use super::criteria::AchievementCriteria;
use super::repository::AchievementStateRecord;
use crate::shared::AchievementId;
use crate::task::TaskCategory;

/// The canonical, versioned list of all achievement definitions.
///
/// Definitions only ever get added; ids are stable forever. Persisted state is
/// merged back on load by id, so users who earned progress under an older
/// catalog keep it while newly shipped entries start locked.
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    entries: Vec<Achievement>,
}

impl AchievementCatalog {
    /// The canonical catalog, all entries locked at progress 0.
    pub fn seeded() -> Self {
        use AchievementCriteria as C;
        use AchievementGroup as G;

        let defs: Vec<(&str, &str, AchievementGroup, AchievementCriteria)> = vec![
            // Milestones
            ("first_step", "First Step", G::Milestones, C::TasksCompleted { count: 1 }),
            ("getting_started", "Getting Started", G::Milestones, C::TasksCompleted { count: 10 }),
            ("task_machine", "Task Machine", G::Milestones, C::TasksCompleted { count: 50 }),
            ("century_club", "Century Club", G::Milestones, C::TasksCompleted { count: 100 }),
            // Consistency
            ("on_a_roll", "On a Roll", G::Consistency, C::Streak { days: 3 }),
            ("week_warrior", "Week Warrior", G::Consistency, C::Streak { days: 7 }),
            ("monthly_master", "Monthly Master", G::Consistency, C::Streak { days: 30 }),
            ("dedicated", "Dedicated", G::Consistency, C::ConsecutiveDays { count: 14 }),
            ("perfect_week", "Perfect Week", G::Consistency, C::PerfectWeek),
            ("weekend_warrior", "Weekend Warrior", G::Consistency, C::WeekendWarrior),
            // Time of day
            ("early_bird", "Early Bird", G::TimeOfDay, C::EarlyBird),
            ("night_owl", "Night Owl", G::TimeOfDay, C::NightOwl),
            ("morning_routine", "Morning Routine", G::TimeOfDay, C::MorningTasks { count: 10 }),
            ("evening_wind_down", "Evening Wind-Down", G::TimeOfDay, C::EveningTasks { count: 10 }),
            // Categories
            ("clean_sweep", "Clean Sweep", G::Categories, C::TasksInCategory { category: TaskCategory::Cleaning, count: 20 }),
            ("laundry_legend", "Laundry Legend", G::Categories, C::TasksInCategory { category: TaskCategory::Laundry, count: 15 }),
            ("kitchen_pro", "Kitchen Pro", G::Categories, C::TasksInCategory { category: TaskCategory::Kitchen, count: 15 }),
            ("master_organizer", "Master Organizer", G::Categories, C::TasksInCategory { category: TaskCategory::Organizing, count: 15 }),
            ("well_rounded", "Well Rounded", G::Categories, C::CategoryVariety { count: 4 }),
            ("jack_of_all_trades", "Jack of All Trades", G::Categories, C::CategoryVariety { count: 7 }),
            // Special
            ("firefighter", "Firefighter", G::Special, C::UrgentTasks { count: 5 }),
            ("crisis_manager", "Crisis Manager", G::Special, C::UrgentTasks { count: 25 }),
            ("quick_draw", "Quick Draw", G::Special, C::QuickCompleter { count: 10 }),
            ("shutterbug", "Shutterbug", G::Special, C::PhotosTaken { count: 20 }),
            ("marathon_effort", "Marathon Effort", G::Special, C::LongTask { hours: 2 }),
            ("power_hour", "Power Hour", G::Special, C::BulkComplete { count: 5 }),
        ];

        let entries = defs
            .into_iter()
            .map(|(id, title, group, criteria)| {
                Achievement::new(AchievementId::new(id), title, group, criteria)
            })
            .collect();

        Self { entries }
    }

    /// Additive merge of persisted state onto the canonical definitions.
    ///
    /// Entries present in both keep their persisted unlock/progress state;
    /// canonical-only entries stay locked at 0; persisted-only ids belong to
    /// removed definitions and are dropped.
    pub fn merge_persisted(&mut self, records: &[AchievementStateRecord]) {
        for record in records {
            match self.entries.iter_mut().find(|e| e.id() == &record.id) {
                Some(entry) => {
                    entry.apply_persisted(record.is_unlocked, record.unlocked_at, record.progress);
                }
                None => {
                    warn!(
                        "[catalog] dropping persisted state for removed achievement id={}",
                        record.id
                    );
                }
            }
        }
    }

    /// Snapshot of every entry in the fixed persistence schema.
    pub fn to_state_records(&self) -> Vec<AchievementStateRecord> {
        self.entries
            .iter()
            .map(|e| AchievementStateRecord {
                id: e.id().clone(),
                is_unlocked: e.is_unlocked(),
                unlocked_at: e.unlocked_at(),
                progress: e.progress(),
            })
            .collect()
    }

    pub fn find_by_id(&self, id: &AchievementId) -> Option<&Achievement> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn in_group(&self, group: AchievementGroup) -> Vec<&Achievement> {
        self.entries.iter().filter(|e| e.group() == group).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Achievement> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_unlocked()).count()
    }
}
