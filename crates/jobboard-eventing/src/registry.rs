//! Static handler registry.

use std::fmt;
use std::sync::Arc;

use jobboard_core::event::DomainEvent;
use jobboard_core::handler::EventHandler;

/// Ordered list of handlers for one event family.
pub struct HandlerRegistry<E: DomainEvent> {
    handlers: Vec<Arc<dyn EventHandler<E>>>,
}

impl<E: DomainEvent> HandlerRegistry<E> {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> HandlerRegistryBuilder<E> {
        HandlerRegistryBuilder {
            handlers: Vec::new(),
        }
    }

    /// Handlers subscribed to `event_type`, in registration order.
    #[must_use]
    pub fn matching(&self, event_type: &str) -> Vec<Arc<dyn EventHandler<E>>> {
        self.handlers
            .iter()
            .filter(|h| h.handled_event_types().covers(event_type))
            .cloned()
            .collect()
    }

    /// Names of all registered handlers, in registration order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.handler_name()).collect()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: DomainEvent> fmt::Debug for HandlerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handler_names())
            .finish()
    }
}

/// Builder for [`HandlerRegistry`].
pub struct HandlerRegistryBuilder<E: DomainEvent> {
    handlers: Vec<Arc<dyn EventHandler<E>>>,
}

impl<E: DomainEvent> HandlerRegistryBuilder<E> {
    /// Appends a handler. Handlers run in the order they are registered.
    #[must_use]
    pub fn register(mut self, handler: Arc<dyn EventHandler<E>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> HandlerRegistry<E> {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}
