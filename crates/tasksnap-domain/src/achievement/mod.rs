mod aggregate;
mod catalog;
mod criteria;
mod evaluator;
mod repository;

#[cfg(test)]
mod evaluator_test;

pub use aggregate::{Achievement, AchievementGroup};
pub use catalog::AchievementCatalog;
pub use criteria::AchievementCriteria;
pub use evaluator::{AchievementEvaluator, UnlockTransition};
pub use repository::{AchievementStateRecord, AchievementStateRepository};
