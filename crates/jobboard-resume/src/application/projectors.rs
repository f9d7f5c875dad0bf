//! Projectors for resume read models.
//!
//! Every event except a deletion re-reads the resume and rebuilds its rows,
//! so the outcome does not depend on the order events arrive in.

use std::sync::Arc;

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::handler::{EventHandler, HandledEventTypes};
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::{AggregateReader, ReadModelRepository};
use tracing::{debug, warn};
use uuid::Uuid;

use super::read_models::{ResumeListing, UserResume};
use crate::domain::aggregates::Resume;
use crate::domain::events::{
    RESUME_CREATED_EVENT_TYPE, RESUME_DELETED_EVENT_TYPE, RESUME_DRAFTED_EVENT_TYPE,
    RESUME_PUBLISHED_EVENT_TYPE, RESUME_UPDATED_EVENT_TYPE, ResumeEvent, ResumeEventKind,
};
use crate::domain::status::ResumeStatus;

/// Maintains [`ResumeListing`] rows, which exist while a resume is
/// published.
pub struct ResumeListingProjector {
    resumes: Arc<dyn AggregateReader<Resume>>,
    listings: Arc<dyn ReadModelRepository<ResumeListing>>,
    text: ExcerptRenderer,
}

impl ResumeListingProjector {
    #[must_use]
    pub fn new(
        resumes: Arc<dyn AggregateReader<Resume>>,
        listings: Arc<dyn ReadModelRepository<ResumeListing>>,
        text: ExcerptRenderer,
    ) -> Self {
        Self {
            resumes,
            listings,
            text,
        }
    }

    async fn drop_listing(&self, resume_id: Uuid) -> Result<(), DomainError> {
        if self.listings.remove(&resume_id).await? {
            debug!(%resume_id, "resume listing removed");
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<ResumeEvent> for ResumeListingProjector {
    fn handler_name(&self) -> &'static str {
        "resume_listing_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            RESUME_PUBLISHED_EVENT_TYPE,
            RESUME_DRAFTED_EVENT_TYPE,
            RESUME_UPDATED_EVENT_TYPE,
            RESUME_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &ResumeEvent) -> Result<(), DomainError> {
        let resume_id = event.resume_id();
        if let ResumeEventKind::ResumeDeleted(_) = event.kind {
            return self.drop_listing(resume_id).await;
        }

        match self.resumes.find_by_id(resume_id).await? {
            Some(resume) if resume.status() == ResumeStatus::Published => {
                self.listings
                    .upsert(ResumeListing::from_resume(&resume, &self.text))
                    .await?;
                debug!(%resume_id, "resume listing refreshed");
                Ok(())
            }
            Some(_) => self.drop_listing(resume_id).await,
            None => {
                warn!(%resume_id, event_type = event.kind.event_type(), "resume no longer exists");
                self.drop_listing(resume_id).await
            }
        }
    }
}

/// Maintains one [`UserResume`] row per resume.
pub struct UserResumeProjector {
    resumes: Arc<dyn AggregateReader<Resume>>,
    rows: Arc<dyn ReadModelRepository<UserResume>>,
}

impl UserResumeProjector {
    #[must_use]
    pub fn new(
        resumes: Arc<dyn AggregateReader<Resume>>,
        rows: Arc<dyn ReadModelRepository<UserResume>>,
    ) -> Self {
        Self { resumes, rows }
    }

    async fn drop_row(&self, resume_id: Uuid) -> Result<(), DomainError> {
        if self.rows.remove(&resume_id).await? {
            debug!(%resume_id, "user resume removed");
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<ResumeEvent> for UserResumeProjector {
    fn handler_name(&self) -> &'static str {
        "user_resume_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            RESUME_CREATED_EVENT_TYPE,
            RESUME_PUBLISHED_EVENT_TYPE,
            RESUME_DRAFTED_EVENT_TYPE,
            RESUME_UPDATED_EVENT_TYPE,
            RESUME_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &ResumeEvent) -> Result<(), DomainError> {
        let resume_id = event.resume_id();
        if let ResumeEventKind::ResumeDeleted(_) = event.kind {
            return self.drop_row(resume_id).await;
        }

        if let Some(resume) = self.resumes.find_by_id(resume_id).await? {
            self.rows.upsert(UserResume::from_resume(&resume)).await?;
            debug!(%resume_id, "user resume refreshed");
            Ok(())
        } else {
            warn!(%resume_id, event_type = event.kind.event_type(), "resume no longer exists");
            self.drop_row(resume_id).await
        }
    }
}
