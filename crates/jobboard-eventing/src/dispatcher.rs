//! Post-commit event dispatcher.

use std::sync::Arc;

use dashmap::DashMap;
use jobboard_core::event::DomainEvent;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::registry::HandlerRegistry;

type KeyLocks = DashMap<(Uuid, &'static str), Arc<Mutex<()>>>;

/// A handler that returned an error for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Name of the failing handler.
    pub handler: &'static str,
    /// Type of the event being handled.
    pub event_type: &'static str,
    /// Identifier of the event being handled.
    pub event_id: Uuid,
    /// Aggregate the event refers to.
    pub aggregate_id: Uuid,
    /// Machine-readable code of the handler's error.
    pub code: &'static str,
    /// Rendered error message.
    pub message: String,
}

/// Outcome of dispatching a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of successful handler invocations.
    pub delivered: usize,
    /// Handler invocations that failed.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    /// Whether every handler invocation succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: Self) {
        self.delivered += other.delivered;
        self.failures.extend(other.failures);
    }
}

/// Routes committed events of family `E` to their registered handlers.
///
/// Events of the same type for the same aggregate never run concurrently:
/// dispatch holds a lock keyed by `(aggregate id, event type)` while that
/// event's handlers run. Different keys proceed independently.
pub struct EventDispatcher<E: DomainEvent> {
    registry: Arc<HandlerRegistry<E>>,
    key_locks: Arc<KeyLocks>,
}

impl<E: DomainEvent> Clone for EventDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            key_locks: Arc::clone(&self.key_locks),
        }
    }
}

impl<E: DomainEvent> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<E: DomainEvent> EventDispatcher<E> {
    /// Creates a dispatcher over a fixed registry.
    #[must_use]
    pub fn new(registry: HandlerRegistry<E>) -> Self {
        Self {
            registry: Arc::new(registry),
            key_locks: Arc::new(DashMap::new()),
        }
    }

    /// The registry this dispatcher routes through.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry<E> {
        &self.registry
    }

    /// Dispatches `events` in order on the current task.
    ///
    /// Handler errors are logged and collected in the report; they never
    /// stop the remaining handlers or events.
    #[instrument(skip_all, fields(event_count = events.len()))]
    pub async fn dispatch(&self, events: &[E]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for event in events {
            report.merge(self.dispatch_one(event).await);
        }
        report
    }

    /// Dispatches `events` on a spawned task.
    ///
    /// The task runs to completion even if the returned handle is dropped,
    /// so a caller that goes away after its commit cannot cut projection
    /// short.
    #[must_use]
    pub fn dispatch_detached(&self, events: Vec<E>) -> DispatchHandle {
        let dispatcher = self.clone();
        let handle = tokio::spawn(async move { dispatcher.dispatch(&events).await });
        DispatchHandle { handle }
    }

    async fn dispatch_one(&self, event: &E) -> DispatchReport {
        let event_type = event.event_type();
        let aggregate_id = event.aggregate_id();
        let handlers = self.registry.matching(event_type);
        let mut report = DispatchReport::default();
        if handlers.is_empty() {
            debug!(event_type, %aggregate_id, "no handlers registered");
            return report;
        }

        let key = (aggregate_id, event_type);
        let lock = Arc::clone(self.key_locks.entry(key).or_default().value());
        {
            let _guard = lock.lock().await;
            for handler in handlers {
                match handler.handle(event).await {
                    Ok(()) => {
                        report.delivered += 1;
                        debug!(
                            handler = handler.handler_name(),
                            event_type,
                            %aggregate_id,
                            "event handled"
                        );
                    }
                    Err(err) => {
                        warn!(
                            handler = handler.handler_name(),
                            event_type,
                            %aggregate_id,
                            event_id = %event.metadata().event_id,
                            code = err.code(),
                            error = %err,
                            "event handler failed; read model left stale"
                        );
                        report.failures.push(HandlerFailure {
                            handler: handler.handler_name(),
                            event_type,
                            event_id: event.metadata().event_id,
                            aggregate_id,
                            code: err.code(),
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
        drop(lock);
        self.key_locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
        report
    }
}

/// Handle to a detached dispatch.
#[derive(Debug)]
pub struct DispatchHandle {
    handle: JoinHandle<DispatchReport>,
}

impl DispatchHandle {
    /// Waits for the dispatch to finish.
    ///
    /// A panicking handler aborts the remaining dispatch of its batch; that
    /// is logged and reported as an empty report.
    pub async fn join(self) -> DispatchReport {
        match self.handle.await {
            Ok(report) => report,
            Err(err) => {
                error!(error = %err, "event dispatch task did not complete");
                DispatchReport::default()
            }
        }
    }
}
