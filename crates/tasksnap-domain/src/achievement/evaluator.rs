use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::info;

use super::catalog::AchievementCatalog;
use super::criteria::AchievementCriteria;
use crate::shared::AchievementId;
use crate::streak::StreakState;
use crate::task::{TaskCategory, TaskRecord};

const MORNING_END_HOUR: u32 = 10;
const EVENING_START_HOUR: u32 = 20;
const EARLY_BIRD_END_HOUR: u32 = 7;
const NIGHT_OWL_START_HOUR: u32 = 23;

/// An achievement that crossed from locked to unlocked during one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockTransition {
    pub id: AchievementId,
    pub title: String,
}

/// Derives progress and unlock state for every locked catalog entry from one
/// consistent snapshot of the task set and the streak.
///
/// Evaluation is deterministic over its inputs and carries no state of its
/// own: the same tasks, streak and `now` always produce the same catalog
/// mutations. Unlocked entries are skipped entirely, which makes unlocks
/// monotonic — deleting tasks later can never revoke one or rewind its
/// frozen progress.
pub struct AchievementEvaluator;

impl AchievementEvaluator {
    /// Evaluate every locked entry, returning the unlock transitions in
    /// catalog order. Each id can appear here at most once over the lifetime
    /// of the catalog, because the unlock flips it out of future evaluations.
    pub fn evaluate(
        catalog: &mut AchievementCatalog,
        tasks: &[TaskRecord],
        streak: &StreakState,
        now: DateTime<Utc>,
    ) -> Vec<UnlockTransition> {
        let counts = SnapshotCounts::from_tasks(tasks);
        let mut unlocked = Vec::new();

        for entry in catalog.iter_mut() {
            if entry.is_unlocked() {
                continue;
            }

            let (progress, satisfied) = measure(entry.criteria(), &counts, streak);

            if satisfied {
                // Both mutations are guarded against double application, and
                // the locked check above makes them unreachable twice.
                if entry.unlock(now).is_ok() {
                    unlocked.push(UnlockTransition {
                        id: entry.id().clone(),
                        title: entry.title().to_string(),
                    });
                }
            } else {
                let _ = entry.record_progress(progress);
            }
        }

        if !unlocked.is_empty() {
            info!(
                "[evaluate] unlocked={} total_unlocked={} tasks={}",
                unlocked.len(),
                catalog.unlocked_count(),
                tasks.len()
            );
        }

        unlocked
    }
}

/// Tallies derived once per evaluation from the task snapshot.
struct SnapshotCounts {
    done_total: u32,
    morning: u32,
    evening: u32,
    urgent: u32,
    earliest_hour: Option<u32>,
    latest_hour: Option<u32>,
    categories: HashSet<TaskCategory>,
    per_category: Vec<(TaskCategory, u32)>,
}

impl SnapshotCounts {
    fn from_tasks(tasks: &[TaskRecord]) -> Self {
        let mut counts = Self {
            done_total: 0,
            morning: 0,
            evening: 0,
            urgent: 0,
            earliest_hour: None,
            latest_hour: None,
            categories: HashSet::new(),
            per_category: Vec::new(),
        };

        for task in tasks.iter().filter(|t| t.is_done()) {
            counts.done_total += 1;
            counts.categories.insert(task.category);
            counts.bump_category(task.category);

            if task.is_urgent {
                counts.urgent += 1;
            }

            // Tasks without a completion timestamp stay out of every
            // time-based tally.
            if let Some(hour) = task.completed_hour() {
                if hour < MORNING_END_HOUR {
                    counts.morning += 1;
                }
                if hour >= EVENING_START_HOUR {
                    counts.evening += 1;
                }
                counts.earliest_hour = Some(counts.earliest_hour.map_or(hour, |h| h.min(hour)));
                counts.latest_hour = Some(counts.latest_hour.map_or(hour, |h| h.max(hour)));
            }
        }

        counts
    }

    fn bump_category(&mut self, category: TaskCategory) {
        match self.per_category.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => self.per_category.push((category, 1)),
        }
    }

    fn in_category(&self, category: TaskCategory) -> u32 {
        self.per_category
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }
}

/// Progress fraction in [0, 1] plus whether the unlock condition holds.
fn measure(
    criteria: &AchievementCriteria,
    counts: &SnapshotCounts,
    streak: &StreakState,
) -> (f64, bool) {
    use AchievementCriteria as C;

    match *criteria {
        C::Streak { days } => fraction(streak.current_streak(), days),
        C::TasksCompleted { count } => fraction(counts.done_total, count),
        C::TasksInCategory { category, count } => fraction(counts.in_category(category), count),
        C::MorningTasks { count } => fraction(counts.morning, count),
        C::EveningTasks { count } => fraction(counts.evening, count),
        C::UrgentTasks { count } => fraction(counts.urgent, count),
        C::CategoryVariety { count } => fraction(counts.categories.len() as u32, count),
        C::EarlyBird => binary(counts.earliest_hour.is_some_and(|h| h < EARLY_BIRD_END_HOUR)),
        C::NightOwl => binary(counts.latest_hour.is_some_and(|h| h >= NIGHT_OWL_START_HOUR)),
        // Pending-signal rules: the snapshot carries no historical data for
        // them, so they report zero progress and never unlock.
        C::QuickCompleter { .. }
        | C::ConsecutiveDays { .. }
        | C::PhotosTaken { .. }
        | C::WeekendWarrior
        | C::PerfectWeek
        | C::LongTask { .. }
        | C::BulkComplete { .. } => (0.0, false),
    }
}

fn fraction(actual: u32, target: u32) -> (f64, bool) {
    // Seed validation keeps target >= 1; guard anyway so evaluation is total.
    let target = target.max(1);
    let progress = (f64::from(actual) / f64::from(target)).min(1.0);
    (progress, actual >= target)
}

fn binary(satisfied: bool) -> (f64, bool) {
    (if satisfied { 1.0 } else { 0.0 }, satisfied)
}
