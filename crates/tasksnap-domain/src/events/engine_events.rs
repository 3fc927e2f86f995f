use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::AchievementId;

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Fired exactly once per achievement id, when it crosses from locked to
/// unlocked. Delivery happens strictly after the state commit that produced
/// the transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementUnlocked {
    pub achievement_id: AchievementId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AchievementUnlocked);

/// Fired when a completion extended the streak past day one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakGrew {
    pub new_streak: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(StreakGrew);

/// Fired once per break, when an expiry check zeroes a stale streak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakBroken {
    pub prior_streak: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(StreakBroken);
