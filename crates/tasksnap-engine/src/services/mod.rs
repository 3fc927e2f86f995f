mod achievement_service;


pub use achievement_service::AchievementService;
