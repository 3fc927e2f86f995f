mod aggregate;
mod repository;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::{StreakState, StreakTransition, GROWTH_STAGE_CAP};
pub use repository::StreakStateRepository;
