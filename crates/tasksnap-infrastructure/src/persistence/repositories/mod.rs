pub mod achievement_state_repo;
pub mod streak_state_repo;
pub mod task_snapshot_repo;

pub use achievement_state_repo::SqliteAchievementStateRepository;
pub use streak_state_repo::SqliteStreakStateRepository;
pub use task_snapshot_repo::SqliteTaskSnapshotRepository;
