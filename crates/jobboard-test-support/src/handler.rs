//! Event handler doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::event::DomainEvent;
use jobboard_core::handler::{EventHandler, HandledEventTypes};
use uuid::Uuid;

/// Shared, ordered log of handler invocations.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<(&'static str, Uuid)>>>,
}

impl CallJournal {
    fn record(&self, handler: &'static str, event_id: Uuid) {
        self.calls.lock().unwrap().push((handler, event_id));
    }

    /// Handler names in invocation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(h, _)| *h).collect()
    }

    /// `(handler, event id)` pairs in invocation order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(&'static str, Uuid)> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether nothing has been recorded yet.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

/// A handler that records every event it receives and succeeds.
#[derive(Debug)]
pub struct RecordingHandler {
    name: &'static str,
    handles: HandledEventTypes,
    journal: CallJournal,
}

impl RecordingHandler {
    /// Creates a recording handler writing into `journal`.
    #[must_use]
    pub fn new(name: &'static str, handles: HandledEventTypes, journal: CallJournal) -> Self {
        Self {
            name,
            handles,
            journal,
        }
    }
}

#[async_trait]
impl<E: DomainEvent> EventHandler<E> for RecordingHandler {
    fn handler_name(&self) -> &'static str {
        self.name
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        self.handles.clone()
    }

    async fn handle(&self, event: &E) -> Result<(), DomainError> {
        self.journal.record(self.name, event.metadata().event_id);
        Ok(())
    }
}

/// A handler that records every event it receives and then fails with an
/// infrastructure error.
#[derive(Debug)]
pub struct FailingHandler {
    name: &'static str,
    handles: HandledEventTypes,
    journal: CallJournal,
}

impl FailingHandler {
    /// Creates a failing handler writing into `journal`.
    #[must_use]
    pub fn new(name: &'static str, handles: HandledEventTypes, journal: CallJournal) -> Self {
        Self {
            name,
            handles,
            journal,
        }
    }
}

#[async_trait]
impl<E: DomainEvent> EventHandler<E> for FailingHandler {
    fn handler_name(&self) -> &'static str {
        self.name
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        self.handles.clone()
    }

    async fn handle(&self, event: &E) -> Result<(), DomainError> {
        self.journal.record(self.name, event.metadata().event_id);
        Err(DomainError::Infrastructure("read model unavailable".into()))
    }
}
