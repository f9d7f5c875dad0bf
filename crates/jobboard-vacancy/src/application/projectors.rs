//! Projectors keeping vacancy read models in step with the write model.
//!
//! Projectors never trust event order. Apart from deletions, every event
//! triggers a re-read of the vacancy and a full rebuild of its rows.

use std::sync::Arc;

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::handler::{EventHandler, HandledEventTypes};
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::{AggregateReader, ReadModelRepository};
use tracing::{debug, warn};
use uuid::Uuid;

use super::read_models::{CompanyVacancy, VacancyListing};
use crate::domain::aggregates::Vacancy;
use crate::domain::events::{
    VACANCY_ARCHIVED_EVENT_TYPE, VACANCY_CREATED_EVENT_TYPE, VACANCY_DELETED_EVENT_TYPE,
    VACANCY_PUBLISHED_EVENT_TYPE, VACANCY_REGISTERED_EVENT_TYPE, VACANCY_UPDATED_EVENT_TYPE,
    VacancyEvent, VacancyEventKind,
};
use crate::domain::status::VacancyStatus;

/// Maintains [`VacancyListing`] rows, which exist while a vacancy is
/// published.
pub struct VacancyListingProjector {
    vacancies: Arc<dyn AggregateReader<Vacancy>>,
    listings: Arc<dyn ReadModelRepository<VacancyListing>>,
    text: ExcerptRenderer,
}

impl VacancyListingProjector {
    /// Creates the projector.
    #[must_use]
    pub fn new(
        vacancies: Arc<dyn AggregateReader<Vacancy>>,
        listings: Arc<dyn ReadModelRepository<VacancyListing>>,
        text: ExcerptRenderer,
    ) -> Self {
        Self {
            vacancies,
            listings,
            text,
        }
    }

    async fn drop_listing(&self, vacancy_id: Uuid) -> Result<(), DomainError> {
        if self.listings.remove(&vacancy_id).await? {
            debug!(%vacancy_id, "vacancy listing removed");
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<VacancyEvent> for VacancyListingProjector {
    fn handler_name(&self) -> &'static str {
        "vacancy_listing_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            VACANCY_PUBLISHED_EVENT_TYPE,
            VACANCY_UPDATED_EVENT_TYPE,
            VACANCY_ARCHIVED_EVENT_TYPE,
            VACANCY_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &VacancyEvent) -> Result<(), DomainError> {
        let vacancy_id = event.vacancy_id();
        if let VacancyEventKind::VacancyDeleted(_) = event.kind {
            return self.drop_listing(vacancy_id).await;
        }

        match self.vacancies.find_by_id(vacancy_id).await? {
            Some(vacancy) if vacancy.status() == VacancyStatus::Published => {
                self.listings
                    .upsert(VacancyListing::from_vacancy(&vacancy, &self.text))
                    .await?;
                debug!(%vacancy_id, "vacancy listing refreshed");
                Ok(())
            }
            Some(_) => self.drop_listing(vacancy_id).await,
            None => {
                warn!(%vacancy_id, event_type = event.kind.event_type(), "vacancy no longer exists");
                self.drop_listing(vacancy_id).await
            }
        }
    }
}

/// Maintains one [`CompanyVacancy`] row per vacancy, keyed by company.
pub struct CompanyVacancyProjector {
    vacancies: Arc<dyn AggregateReader<Vacancy>>,
    rows: Arc<dyn ReadModelRepository<CompanyVacancy>>,
}

impl CompanyVacancyProjector {
    /// Creates the projector.
    #[must_use]
    pub fn new(
        vacancies: Arc<dyn AggregateReader<Vacancy>>,
        rows: Arc<dyn ReadModelRepository<CompanyVacancy>>,
    ) -> Self {
        Self { vacancies, rows }
    }

    async fn drop_rows(&self, vacancy_id: Uuid) -> Result<(), DomainError> {
        let removed = self
            .rows
            .remove_where(&|row: &CompanyVacancy| row.vacancy_id == vacancy_id)
            .await?;
        debug!(%vacancy_id, removed, "company vacancy rows removed");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<VacancyEvent> for CompanyVacancyProjector {
    fn handler_name(&self) -> &'static str {
        "company_vacancy_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            VACANCY_CREATED_EVENT_TYPE,
            VACANCY_REGISTERED_EVENT_TYPE,
            VACANCY_PUBLISHED_EVENT_TYPE,
            VACANCY_ARCHIVED_EVENT_TYPE,
            VACANCY_UPDATED_EVENT_TYPE,
            VACANCY_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &VacancyEvent) -> Result<(), DomainError> {
        let vacancy_id = event.vacancy_id();
        if let VacancyEventKind::VacancyDeleted(_) = event.kind {
            return self.drop_rows(vacancy_id).await;
        }

        if let Some(vacancy) = self.vacancies.find_by_id(vacancy_id).await? {
            self.rows.upsert(CompanyVacancy::from_vacancy(&vacancy)).await?;
            debug!(%vacancy_id, "company vacancy refreshed");
            Ok(())
        } else {
            warn!(%vacancy_id, event_type = event.kind.event_type(), "vacancy no longer exists");
            self.drop_rows(vacancy_id).await
        }
    }
}
