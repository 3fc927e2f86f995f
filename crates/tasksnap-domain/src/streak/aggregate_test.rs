#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let mut streak = StreakState::new();

        let transition = streak.record_completion(at(2025, 6, 1, 9));

        assert_eq!(transition, StreakTransition::Restarted);
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 1);
        assert_eq!(
            streak.last_completion_day(),
            Some(at(2025, 6, 1, 9).date_naive())
        );
    }

    #[test]
    fn test_same_day_completion_is_idempotent() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));
        streak.record_completion(at(2025, 6, 2, 9));

        let transition = streak.record_completion(at(2025, 6, 2, 23));

        assert_eq!(transition, StreakTransition::SameDay);
        assert_eq!(streak.current_streak(), 2);
        assert_eq!(streak.longest_streak(), 2);
    }

    #[test]
    fn test_next_day_extends_streak() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));

        let transition = streak.record_completion(at(2025, 6, 2, 7));

        assert_eq!(transition, StreakTransition::Extended { new_streak: 2 });
        assert_eq!(streak.current_streak(), 2);
    }

    #[test]
    fn test_midnight_boundary_counts_calendar_days_not_hours() {
        let mut streak = StreakState::new();
        streak.record_completion(Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 0).unwrap());

        // Two minutes later, but the calendar day changed
        let transition =
            streak.record_completion(Utc.with_ymd_and_hms(2025, 6, 2, 0, 1, 0).unwrap());

        assert_eq!(transition, StreakTransition::Extended { new_streak: 2 });
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));
        streak.record_completion(at(2025, 6, 2, 9));
        streak.record_completion(at(2025, 6, 3, 9));

        let transition = streak.record_completion(at(2025, 6, 7, 9));

        assert_eq!(transition, StreakTransition::Restarted);
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 3);
    }

    // Scenario A from the engine contract
    #[test]
    fn test_completion_sequence_scenario() {
        let mut streak = StreakState::new();

        streak.record_completion(at(2025, 6, 1, 10));
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 1);

        streak.record_completion(at(2025, 6, 2, 10));
        assert_eq!(streak.current_streak(), 2);

        streak.record_completion(at(2025, 6, 2, 18));
        assert_eq!(streak.current_streak(), 2);

        streak.record_completion(at(2025, 6, 5, 10));
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 2);
    }

    #[test]
    fn test_longest_streak_is_monotonic() {
        let mut streak = StreakState::new();
        let days = [1, 2, 3, 7, 8, 9, 10, 20];

        let mut previous_longest = 0;
        for day in days {
            streak.record_completion(at(2025, 6, day, 12));
            assert!(streak.longest_streak() >= previous_longest);
            assert!(streak.longest_streak() >= streak.current_streak());
            previous_longest = streak.longest_streak();
        }
        assert_eq!(streak.longest_streak(), 4);
    }

    #[test]
    fn test_check_expiry_breaks_stale_streak_once() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));
        streak.record_completion(at(2025, 6, 2, 9));

        let broken = streak.check_expiry(at(2025, 6, 5, 8));
        assert_eq!(broken, Some(2));
        assert_eq!(streak.current_streak(), 0);
        assert_eq!(streak.longest_streak(), 2);

        // Second check reports nothing; the break already happened
        assert_eq!(streak.check_expiry(at(2025, 6, 5, 20)), None);
    }

    #[test]
    fn test_check_expiry_within_grace_day_is_noop() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));

        assert_eq!(streak.check_expiry(at(2025, 6, 2, 23)), None);
        assert_eq!(streak.current_streak(), 1);
    }

    #[test]
    fn test_completion_after_expiry_restarts_at_one() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));
        streak.record_completion(at(2025, 6, 2, 9));
        streak.check_expiry(at(2025, 6, 6, 9));

        let transition = streak.record_completion(at(2025, 6, 6, 10));
        assert_eq!(transition, StreakTransition::Restarted);
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 2);
    }

    #[test]
    fn test_extension_day_after_expiry_does_not_signal_growth() {
        let mut streak = StreakState::new();
        streak.record_completion(at(2025, 6, 1, 9));
        streak.check_expiry(at(2025, 6, 4, 9));
        assert_eq!(streak.current_streak(), 0);

        // Delta from the last completion day is > 1, so this restarts
        let transition = streak.record_completion(at(2025, 6, 4, 10));
        assert_eq!(transition, StreakTransition::Restarted);
        assert_eq!(streak.current_streak(), 1);
    }

    #[test]
    fn test_is_at_risk() {
        let mut streak = StreakState::new();
        assert!(!streak.is_at_risk(at(2025, 6, 1, 9)));

        streak.record_completion(at(2025, 6, 1, 9));
        assert!(!streak.is_at_risk(at(2025, 6, 1, 20)));
        assert!(streak.is_at_risk(at(2025, 6, 2, 8)));
        assert!(!streak.is_at_risk(at(2025, 6, 3, 8)));
    }

    #[test]
    fn test_growth_stage_tracks_streak_and_caps() {
        let mut streak = StreakState::new();
        assert_eq!(streak.growth_stage(), 0);

        for day in 1..=15 {
            streak.record_completion(at(2025, 6, day, 12));
            assert_eq!(streak.growth_stage(), streak.current_streak().min(10));
        }
        assert_eq!(streak.current_streak(), 15);
        assert_eq!(streak.growth_stage(), 10);

        streak.check_expiry(at(2025, 6, 20, 12));
        assert_eq!(streak.growth_stage(), 0);
    }

    #[test]
    fn test_restore_repairs_longest_below_current() {
        let streak = StreakState::restore(5, 3, Some(at(2025, 6, 1, 0).date_naive()));
        assert_eq!(streak.longest_streak(), 5);
    }
}
