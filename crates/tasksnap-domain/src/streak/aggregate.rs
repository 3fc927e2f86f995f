use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Growth stages above this streak length all render the same fully-grown
/// decoration, so the derived stage is capped here.
pub const GROWTH_STAGE_CAP: u32 = 10;

/// Outcome of recording a completion against the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// A completion was already recorded on this calendar day; nothing changed.
    SameDay,
    /// The completion fell exactly one calendar day after the previous one.
    /// The streak-grew signal fires only when `new_streak > 1`.
    Extended { new_streak: u32 },
    /// First completion ever, or the gap was wider than one day; the streak
    /// restarted at 1.
    Restarted,
}

/// Day-granularity continuity of task completions.
///
/// All day arithmetic is whole-calendar-day (midnight-to-midnight) via
/// `NaiveDate` subtraction, never elapsed hours, so a completion at 23:59
/// followed by one at 00:01 still counts as consecutive days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakState {
    current_streak: u32,
    longest_streak: u32,
    last_completion_day: Option<NaiveDate>,
}

impl StreakState {
    pub fn new() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_completion_day: None,
        }
    }

    pub fn restore(
        current_streak: u32,
        longest_streak: u32,
        last_completion_day: Option<NaiveDate>,
    ) -> Self {
        Self {
            current_streak,
            // longest >= current must survive a reload of hand-edited state
            longest_streak: longest_streak.max(current_streak),
            last_completion_day,
        }
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_completion_day(&self) -> Option<NaiveDate> {
        self.last_completion_day
    }

    /// Decorative progression stage derived from the current streak,
    /// capped at [`GROWTH_STAGE_CAP`].
    pub fn growth_stage(&self) -> u32 {
        self.current_streak.min(GROWTH_STAGE_CAP)
    }

    /// Record a task completion at `now`.
    ///
    /// Same calendar day: no-op. Exactly one day later: the streak grows.
    /// Anything else (first completion, or a gap): the streak restarts at 1.
    /// `longest_streak` is bumped monotonically in every mutating path.
    pub fn record_completion(&mut self, now: DateTime<Utc>) -> StreakTransition {
        let today = now.date_naive();

        let transition = match self.day_delta(today) {
            Some(0) => return StreakTransition::SameDay,
            Some(1) => {
                self.current_streak += 1;
                StreakTransition::Extended {
                    new_streak: self.current_streak,
                }
            }
            _ => {
                self.current_streak = 1;
                StreakTransition::Restarted
            }
        };

        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_completion_day = Some(today);
        transition
    }

    /// Zero the current streak when more than one full day has passed since
    /// the last completion. Returns the prior streak when a break happened,
    /// so the caller can emit the streak-broken signal exactly once.
    pub fn check_expiry(&mut self, now: DateTime<Utc>) -> Option<u32> {
        let today = now.date_naive();
        match self.day_delta(today) {
            Some(delta) if delta > 1 && self.current_streak > 0 => {
                let prior = self.current_streak;
                self.current_streak = 0;
                Some(prior)
            }
            _ => None,
        }
    }

    /// The streak survives only if a task gets completed today.
    pub fn is_at_risk(&self, now: DateTime<Utc>) -> bool {
        self.current_streak > 0 && self.day_delta(now.date_naive()) == Some(1)
    }

    fn day_delta(&self, today: NaiveDate) -> Option<i64> {
        self.last_completion_day
            .map(|last| (today - last).num_days())
    }
}

impl Default for StreakState {
    fn default() -> Self {
        Self::new()
    }
}
