//! Domain events for the Applications context.

use chrono::{DateTime, Utc};
use jobboard_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type for [`ApplicationSubmitted`].
pub const APPLICATION_SUBMITTED_EVENT_TYPE: &str = "application.submitted";
/// Event type for [`ApplicationWithdrawn`].
pub const APPLICATION_WITHDRAWN_EVENT_TYPE: &str = "application.withdrawn";

/// Emitted when an applicant applies to a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmitted {
    /// The application identifier.
    pub application_id: Uuid,
}

/// Emitted when an applicant withdraws an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationWithdrawn {
    /// The application identifier.
    pub application_id: Uuid,
}

/// Event payload variants for the Applications context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationEventKind {
    ApplicationSubmitted(ApplicationSubmitted),
    ApplicationWithdrawn(ApplicationWithdrawn),
}

impl ApplicationEventKind {
    /// The application the payload refers to.
    #[must_use]
    pub const fn application_id(&self) -> Uuid {
        match self {
            Self::ApplicationSubmitted(ApplicationSubmitted { application_id })
            | Self::ApplicationWithdrawn(ApplicationWithdrawn { application_id }) => {
                *application_id
            }
        }
    }

    /// The routing type of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ApplicationSubmitted(_) => APPLICATION_SUBMITTED_EVENT_TYPE,
            Self::ApplicationWithdrawn(_) => APPLICATION_WITHDRAWN_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Applications context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ApplicationEventKind,
}

impl ApplicationEvent {
    /// Wraps `kind` in metadata for an event caused by a command.
    #[must_use]
    pub fn new(
        kind: ApplicationEventKind,
        correlation_id: Uuid,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: EventMetadata::caused_by_command(
                kind.event_type(),
                kind.application_id(),
                correlation_id,
                occurred_at,
            ),
            kind,
        }
    }

    #[must_use]
    pub const fn application_id(&self) -> Uuid {
        self.kind.application_id()
    }
}

impl DomainEvent for ApplicationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
