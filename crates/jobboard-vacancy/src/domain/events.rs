//! Domain events for the Vacancy context.
//!
//! Payloads carry identifiers only; projectors re-read the vacancy for
//! everything else.

use jobboard_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type for [`VacancyCreated`].
pub const VACANCY_CREATED_EVENT_TYPE: &str = "vacancy.created";
/// Event type for [`VacancyRegistered`].
pub const VACANCY_REGISTERED_EVENT_TYPE: &str = "vacancy.registered";
/// Event type for [`VacancyPublished`].
pub const VACANCY_PUBLISHED_EVENT_TYPE: &str = "vacancy.published";
/// Event type for [`VacancyArchived`].
pub const VACANCY_ARCHIVED_EVENT_TYPE: &str = "vacancy.archived";
/// Event type for [`VacancyUpdated`].
pub const VACANCY_UPDATED_EVENT_TYPE: &str = "vacancy.updated";
/// Event type for [`VacancyDeleted`].
pub const VACANCY_DELETED_EVENT_TYPE: &str = "vacancy.deleted";

/// Emitted when a vacancy draft is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyCreated {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Emitted when a draft is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRegistered {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
    /// The user who registered it.
    pub registering_user_id: Uuid,
}

/// Emitted when a vacancy becomes visible to applicants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyPublished {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Emitted when a published vacancy is archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyArchived {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Emitted once per command that changed vacancy fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyUpdated {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Emitted when a vacancy is removed from the write model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyDeleted {
    /// The vacancy identifier.
    pub vacancy_id: Uuid,
}

/// Event payload variants for the Vacancy context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VacancyEventKind {
    /// A draft was created.
    VacancyCreated(VacancyCreated),
    /// A draft was registered.
    VacancyRegistered(VacancyRegistered),
    /// The vacancy was published.
    VacancyPublished(VacancyPublished),
    /// The vacancy was archived.
    VacancyArchived(VacancyArchived),
    /// Vacancy fields changed.
    VacancyUpdated(VacancyUpdated),
    /// The vacancy was deleted.
    VacancyDeleted(VacancyDeleted),
}

impl VacancyEventKind {
    /// The vacancy the payload refers to.
    #[must_use]
    pub const fn vacancy_id(&self) -> Uuid {
        match self {
            Self::VacancyCreated(VacancyCreated { vacancy_id })
            | Self::VacancyRegistered(VacancyRegistered { vacancy_id, .. })
            | Self::VacancyPublished(VacancyPublished { vacancy_id })
            | Self::VacancyArchived(VacancyArchived { vacancy_id })
            | Self::VacancyUpdated(VacancyUpdated { vacancy_id })
            | Self::VacancyDeleted(VacancyDeleted { vacancy_id }) => *vacancy_id,
        }
    }

    /// The routing type of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::VacancyCreated(_) => VACANCY_CREATED_EVENT_TYPE,
            Self::VacancyRegistered(_) => VACANCY_REGISTERED_EVENT_TYPE,
            Self::VacancyPublished(_) => VACANCY_PUBLISHED_EVENT_TYPE,
            Self::VacancyArchived(_) => VACANCY_ARCHIVED_EVENT_TYPE,
            Self::VacancyUpdated(_) => VACANCY_UPDATED_EVENT_TYPE,
            Self::VacancyDeleted(_) => VACANCY_DELETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Vacancy context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: VacancyEventKind,
}

impl VacancyEvent {
    /// Wraps `kind` in metadata for an event caused by a command.
    #[must_use]
    pub fn new(
        kind: VacancyEventKind,
        correlation_id: Uuid,
        occurred_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            metadata: EventMetadata::caused_by_command(
                kind.event_type(),
                kind.vacancy_id(),
                correlation_id,
                occurred_at,
            ),
            kind,
        }
    }

    /// The vacancy this event refers to.
    #[must_use]
    pub const fn vacancy_id(&self) -> Uuid {
        self.kind.vacancy_id()
    }
}

impl DomainEvent for VacancyEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
