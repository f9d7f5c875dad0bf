//! Domain events for the Resume context.

use chrono::{DateTime, Utc};
use jobboard_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event type for [`ResumeCreated`].
pub const RESUME_CREATED_EVENT_TYPE: &str = "resume.created";
/// Event type for [`ResumePublished`].
pub const RESUME_PUBLISHED_EVENT_TYPE: &str = "resume.published";
/// Event type for [`ResumeDrafted`].
pub const RESUME_DRAFTED_EVENT_TYPE: &str = "resume.drafted";
/// Event type for [`ResumeUpdated`].
pub const RESUME_UPDATED_EVENT_TYPE: &str = "resume.updated";
/// Event type for [`ResumeDeleted`].
pub const RESUME_DELETED_EVENT_TYPE: &str = "resume.deleted";

/// Emitted when a resume is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeCreated {
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Emitted when a resume is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePublished {
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Emitted when a published resume returns to draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDrafted {
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Emitted once per command that changed resume fields or entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUpdated {
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Emitted when a resume is removed from the write model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDeleted {
    /// The resume identifier.
    pub resume_id: Uuid,
}

/// Event payload variants for the Resume context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeEventKind {
    /// A resume was created.
    ResumeCreated(ResumeCreated),
    /// A resume was published.
    ResumePublished(ResumePublished),
    /// A resume went back to draft.
    ResumeDrafted(ResumeDrafted),
    /// Resume content changed.
    ResumeUpdated(ResumeUpdated),
    /// A resume was deleted.
    ResumeDeleted(ResumeDeleted),
}

impl ResumeEventKind {
    /// The resume the payload refers to.
    #[must_use]
    pub const fn resume_id(&self) -> Uuid {
        match self {
            Self::ResumeCreated(ResumeCreated { resume_id })
            | Self::ResumePublished(ResumePublished { resume_id })
            | Self::ResumeDrafted(ResumeDrafted { resume_id })
            | Self::ResumeUpdated(ResumeUpdated { resume_id })
            | Self::ResumeDeleted(ResumeDeleted { resume_id }) => *resume_id,
        }
    }

    /// The routing type of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ResumeCreated(_) => RESUME_CREATED_EVENT_TYPE,
            Self::ResumePublished(_) => RESUME_PUBLISHED_EVENT_TYPE,
            Self::ResumeDrafted(_) => RESUME_DRAFTED_EVENT_TYPE,
            Self::ResumeUpdated(_) => RESUME_UPDATED_EVENT_TYPE,
            Self::ResumeDeleted(_) => RESUME_DELETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Resume context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ResumeEventKind,
}

impl ResumeEvent {
    /// Wraps `kind` in metadata for an event caused by a command.
    #[must_use]
    pub fn new(kind: ResumeEventKind, correlation_id: Uuid, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::caused_by_command(
                kind.event_type(),
                kind.resume_id(),
                correlation_id,
                occurred_at,
            ),
            kind,
        }
    }

    /// The resume this event refers to.
    #[must_use]
    pub const fn resume_id(&self) -> Uuid {
        self.kind.resume_id()
    }
}

impl DomainEvent for ResumeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
