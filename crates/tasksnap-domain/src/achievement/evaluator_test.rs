#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::shared::{AchievementId, TaskId};
    use crate::streak::StreakState;
    use crate::task::{TaskCategory, TaskRecord, TaskStatus};
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    fn done_task(category: TaskCategory, completed_hour: u32) -> TaskRecord {
        TaskRecord {
            id: TaskId::new(),
            status: TaskStatus::Done,
            category,
            created_at: Utc.with_ymd_and_hms(2025, 6, 9, 8, 0, 0).unwrap(),
            started_at: None,
            completed_at: Some(
                Utc.with_ymd_and_hms(2025, 6, 9, completed_hour, 30, 0).unwrap(),
            ),
            is_urgent: false,
            has_before_photo: false,
            has_after_photo: false,
        }
    }

    fn done_tasks(count: usize) -> Vec<TaskRecord> {
        (0..count)
            .map(|_| done_task(TaskCategory::Cleaning, 12))
            .collect()
    }

    fn entry<'a>(catalog: &'a AchievementCatalog, id: &str) -> &'a Achievement {
        catalog.find_by_id(&AchievementId::new(id)).unwrap()
    }

    #[test]
    fn test_empty_task_list_unlocks_nothing() {
        let mut catalog = AchievementCatalog::seeded();

        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &[], &StreakState::new(), now());

        assert!(unlocked.is_empty());
        for e in catalog.iter() {
            assert!(!e.is_unlocked());
            assert_eq!(e.progress(), 0.0);
        }
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let tasks = done_tasks(7);
        let streak = StreakState::new();

        let mut first = AchievementCatalog::seeded();
        AchievementEvaluator::evaluate(&mut first, &tasks, &streak, now());
        let mut second = AchievementCatalog::seeded();
        AchievementEvaluator::evaluate(&mut second, &tasks, &streak, now());

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.progress(), b.progress());
            assert_eq!(a.is_unlocked(), b.is_unlocked());
            assert_eq!(a.unlocked_at(), b.unlocked_at());
        }
    }

    // Scenario B from the engine contract, against tasks_completed(50)
    #[test]
    fn test_tasks_completed_threshold_and_monotonicity() {
        let mut catalog = AchievementCatalog::seeded();
        let streak = StreakState::new();

        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &done_tasks(49), &streak, now());
        assert!(!unlocked.iter().any(|u| u.id.as_str() == "task_machine"));
        assert_eq!(entry(&catalog, "task_machine").progress(), 0.98);
        assert!(!entry(&catalog, "task_machine").is_unlocked());

        let unlock_time = now();
        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &done_tasks(50), &streak, unlock_time);
        let hits: Vec<_> = unlocked
            .iter()
            .filter(|u| u.id.as_str() == "task_machine")
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Task Machine");
        assert!(entry(&catalog, "task_machine").is_unlocked());
        assert_eq!(entry(&catalog, "task_machine").unlocked_at(), Some(unlock_time));

        // A task got deleted; the unlock and its progress are frozen
        let later = Utc.with_ymd_and_hms(2025, 6, 11, 9, 0, 0).unwrap();
        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &done_tasks(49), &streak, later);
        assert!(!unlocked.iter().any(|u| u.id.as_str() == "task_machine"));
        assert!(entry(&catalog, "task_machine").is_unlocked());
        assert_eq!(entry(&catalog, "task_machine").progress(), 1.0);
        assert_eq!(entry(&catalog, "task_machine").unlocked_at(), Some(unlock_time));
    }

    #[test]
    fn test_streak_criteria_progress_and_unlock() {
        let mut catalog = AchievementCatalog::seeded();
        let mut streak = StreakState::new();
        for day in 1..=3 {
            streak.record_completion(Utc.with_ymd_and_hms(2025, 6, day, 9, 0, 0).unwrap());
        }

        let unlocked = AchievementEvaluator::evaluate(&mut catalog, &[], &streak, now());

        assert!(unlocked.iter().any(|u| u.id.as_str() == "on_a_roll"));
        assert!(entry(&catalog, "on_a_roll").is_unlocked());
        // 3 of 7 days toward the week streak
        let week = entry(&catalog, "week_warrior");
        assert!(!week.is_unlocked());
        assert!((week.progress() - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_counting_and_variety() {
        let mut catalog = AchievementCatalog::seeded();
        let mut tasks: Vec<TaskRecord> = (0..15)
            .map(|_| done_task(TaskCategory::Laundry, 12))
            .collect();
        tasks.push(done_task(TaskCategory::Kitchen, 12));
        tasks.push(done_task(TaskCategory::Cleaning, 12));
        tasks.push(done_task(TaskCategory::Organizing, 12));

        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &tasks, &StreakState::new(), now());

        assert!(unlocked.iter().any(|u| u.id.as_str() == "laundry_legend"));
        // 4 distinct categories unlocks well_rounded but not jack_of_all_trades
        assert!(unlocked.iter().any(|u| u.id.as_str() == "well_rounded"));
        let jack = entry(&catalog, "jack_of_all_trades");
        assert!(!jack.is_unlocked());
        assert!((jack.progress() - 4.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_of_day_criteria() {
        let mut catalog = AchievementCatalog::seeded();
        let tasks = vec![
            done_task(TaskCategory::Cleaning, 6),  // early bird + morning
            done_task(TaskCategory::Kitchen, 9),   // morning
            done_task(TaskCategory::Laundry, 21),  // evening
            done_task(TaskCategory::Other, 23),    // night owl + evening
        ];

        let unlocked =
            AchievementEvaluator::evaluate(&mut catalog, &tasks, &StreakState::new(), now());

        assert!(unlocked.iter().any(|u| u.id.as_str() == "early_bird"));
        assert!(unlocked.iter().any(|u| u.id.as_str() == "night_owl"));

        let morning = entry(&catalog, "morning_routine");
        assert!((morning.progress() - 0.2).abs() < 1e-9); // 2 of 10
        let evening = entry(&catalog, "evening_wind_down");
        assert!((evening.progress() - 0.2).abs() < 1e-9); // 2 of 10
    }

    #[test]
    fn test_boundary_hours() {
        let mut catalog = AchievementCatalog::seeded();
        // 07:30 is not early-bird, 10:30 is not morning, 20:30 is evening,
        // 22:30 is not night-owl
        let tasks = vec![
            done_task(TaskCategory::Cleaning, 7),
            done_task(TaskCategory::Cleaning, 10),
            done_task(TaskCategory::Cleaning, 20),
            done_task(TaskCategory::Cleaning, 22),
        ];

        AchievementEvaluator::evaluate(&mut catalog, &tasks, &StreakState::new(), now());

        assert!(!entry(&catalog, "early_bird").is_unlocked());
        assert!(!entry(&catalog, "night_owl").is_unlocked());
        assert!((entry(&catalog, "morning_routine").progress() - 0.1).abs() < 1e-9);
        assert!((entry(&catalog, "evening_wind_down").progress() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_urgent_tasks() {
        let mut catalog = AchievementCatalog::seeded();
        let mut tasks = done_tasks(3);
        for task in tasks.iter_mut() {
            task.is_urgent = true;
        }
        tasks.push(done_task(TaskCategory::Other, 12));

        AchievementEvaluator::evaluate(&mut catalog, &tasks, &StreakState::new(), now());

        let firefighter = entry(&catalog, "firefighter");
        assert!(!firefighter.is_unlocked());
        assert!((firefighter.progress() - 0.6).abs() < 1e-9); // 3 of 5
    }

    #[test]
    fn test_done_without_completion_timestamp_counts_only_plain_totals() {
        let mut catalog = AchievementCatalog::seeded();
        let mut task = done_task(TaskCategory::Cleaning, 6);
        task.completed_at = None;

        AchievementEvaluator::evaluate(&mut catalog, &[task], &StreakState::new(), now());

        // Counts toward first_step but not toward any time-based rule
        assert!(entry(&catalog, "first_step").is_unlocked());
        assert!(!entry(&catalog, "early_bird").is_unlocked());
        assert_eq!(entry(&catalog, "morning_routine").progress(), 0.0);
    }

    #[test]
    fn test_todo_and_doing_tasks_are_ignored() {
        let mut catalog = AchievementCatalog::seeded();
        let mut todo = done_task(TaskCategory::Cleaning, 9);
        todo.status = TaskStatus::Todo;
        let mut doing = done_task(TaskCategory::Cleaning, 9);
        doing.status = TaskStatus::Doing;

        let unlocked = AchievementEvaluator::evaluate(
            &mut catalog,
            &[todo, doing],
            &StreakState::new(),
            now(),
        );

        assert!(unlocked.is_empty());
        assert_eq!(entry(&catalog, "first_step").progress(), 0.0);
    }

    #[test]
    fn test_pending_signal_criteria_never_progress() {
        let mut catalog = AchievementCatalog::seeded();
        // A rich snapshot that satisfies many live rules
        let mut tasks = done_tasks(200);
        for task in tasks.iter_mut() {
            task.is_urgent = true;
            task.has_before_photo = true;
            task.has_after_photo = true;
        }

        AchievementEvaluator::evaluate(&mut catalog, &tasks, &StreakState::new(), now());

        for id in [
            "quick_draw",
            "dedicated",
            "shutterbug",
            "weekend_warrior",
            "perfect_week",
            "marathon_effort",
            "power_hour",
        ] {
            let pending = entry(&catalog, id);
            assert!(pending.is_pending_signal(), "{} should be pending", id);
            assert!(!pending.is_unlocked(), "{} must never unlock", id);
            assert_eq!(pending.progress(), 0.0);
        }
    }

    #[test]
    fn test_progress_always_within_unit_interval() {
        let mut catalog = AchievementCatalog::seeded();
        let mut streak = StreakState::new();
        for day in 1..=28 {
            streak.record_completion(Utc.with_ymd_and_hms(2025, 6, day, 9, 0, 0).unwrap());
        }
        let mut tasks = done_tasks(500);
        for task in tasks.iter_mut() {
            task.is_urgent = true;
        }

        AchievementEvaluator::evaluate(&mut catalog, &tasks, &streak, now());

        for e in catalog.iter() {
            assert!(
                (0.0..=1.0).contains(&e.progress()),
                "progress out of range on {}",
                e.id()
            );
        }
    }

    #[test]
    fn test_unlock_event_emitted_at_most_once_per_id() {
        let mut catalog = AchievementCatalog::seeded();
        let streak = StreakState::new();
        let tasks = done_tasks(60);

        let first = AchievementEvaluator::evaluate(&mut catalog, &tasks, &streak, now());
        let again = AchievementEvaluator::evaluate(&mut catalog, &tasks, &streak, now());

        assert!(first.iter().any(|u| u.id.as_str() == "task_machine"));
        assert!(again.is_empty());
    }
}
