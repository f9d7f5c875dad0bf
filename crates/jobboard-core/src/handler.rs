//! Event handler abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Event types a handler subscribes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandledEventTypes {
    /// A single event type.
    One(&'static str),
    /// Several event types.
    Many(Vec<&'static str>),
    /// Every event type of the handler's event family.
    All,
}

impl HandledEventTypes {
    /// Whether `event_type` is covered by this subscription.
    #[must_use]
    pub fn covers(&self, event_type: &str) -> bool {
        match self {
            Self::One(handled) => *handled == event_type,
            Self::Many(handled) => handled.contains(&event_type),
            Self::All => true,
        }
    }
}

/// Reacts to dispatched domain events of family `E`.
///
/// Handlers run after the triggering command has committed and may receive
/// the same event more than once, so `handle` must be idempotent.
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Handler name used in logs and dispatch reports.
    fn handler_name(&self) -> &'static str;

    /// Event types this handler subscribes to.
    fn handled_event_types(&self) -> HandledEventTypes;

    /// Handles one event.
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}
