use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Capped 0-10 stage driving the decorative progression
    pub growth_stage: u32,
    pub last_completion_day: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    /// True when only a completion today keeps the streak alive
    pub at_risk: bool,
}
