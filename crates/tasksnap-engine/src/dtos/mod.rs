mod achievement_dto;
mod streak_dto;

pub use achievement_dto::AchievementDto;
pub use streak_dto::StreakDto;
