//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for state-based aggregate roots persisted through a repository.
pub trait AggregateRoot: Clone + Send + Sync + 'static {
    /// The event type this aggregate emits.
    type Event: DomainEvent;

    /// Lowercase aggregate type name used in errors and logs.
    const AGGREGATE_TYPE: &'static str;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the persisted version this instance was loaded at.
    fn version(&self) -> i64;

    /// Records the version assigned by the repository on commit or load.
    fn set_version(&mut self, version: i64);

    /// Returns events emitted since the aggregate was loaded.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after persistence.
    fn clear_uncommitted_events(&mut self);

    /// Drains uncommitted events, leaving the buffer empty.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        let events = self.uncommitted_events().to_vec();
        self.clear_uncommitted_events();
        events
    }
}
