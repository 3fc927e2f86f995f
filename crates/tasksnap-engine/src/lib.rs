// Application layer - orchestrates the domain over the infrastructure
// Owns the single serialized access path to achievement and streak state

pub mod bootstrap;
pub mod dtos;
pub mod services;

pub use bootstrap::{build_engine, build_engine_with_database, Engine};
pub use services::AchievementService;
