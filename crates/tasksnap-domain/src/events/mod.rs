use std::any::Any;

pub mod engine_events;
pub mod event_bus;

pub use engine_events::{AchievementUnlocked, StreakBroken, StreakGrew};
pub use event_bus::{DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper};

/// Base trait for all domain events
/// All events must be Send + Sync for thread safety
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Fully-qualified name of the concrete event type
    fn event_type_name(&self) -> &'static str;
}
