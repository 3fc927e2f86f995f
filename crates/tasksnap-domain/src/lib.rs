// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod achievement;
pub mod events;
pub mod shared;
pub mod streak;
pub mod task;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{AchievementId, DomainError, TaskId};
