//! Projectors for application read models.
//!
//! Both projectors listen to events from three contexts. Whatever arrives,
//! they re-read the application, vacancy and resume involved and rebuild the
//! affected rows from that state. Rows only exist for a published vacancy,
//! and only applications whose resume still exists are shown or counted.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::error::DomainError;
use jobboard_core::handler::{EventHandler, HandledEventTypes};
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::{AggregateReader, ReadModelRepository};
use jobboard_resume::domain::aggregates::Resume;
use jobboard_resume::domain::events::{
    RESUME_DELETED_EVENT_TYPE, RESUME_UPDATED_EVENT_TYPE, ResumeEvent, ResumeEventKind,
};
use jobboard_vacancy::domain::aggregates::Vacancy;
use jobboard_vacancy::domain::events::{
    VACANCY_ARCHIVED_EVENT_TYPE, VACANCY_DELETED_EVENT_TYPE, VACANCY_PUBLISHED_EVENT_TYPE,
    VACANCY_UPDATED_EVENT_TYPE, VacancyEvent, VacancyEventKind,
};
use jobboard_vacancy::domain::status::VacancyStatus;
use tracing::{debug, warn};
use uuid::Uuid;

use super::read_models::{ApplicationView, VacancyApplicationSummary};
use crate::domain::aggregates::JobApplication;
use crate::domain::events::{
    APPLICATION_SUBMITTED_EVENT_TYPE, APPLICATION_WITHDRAWN_EVENT_TYPE, ApplicationEvent,
};
use crate::domain::repository::ApplicationLookup;

/// Loads the vacancy if it exists and is published.
async fn live_vacancy(
    vacancies: &dyn AggregateReader<Vacancy>,
    vacancy_id: Uuid,
) -> Result<Option<Vacancy>, DomainError> {
    Ok(vacancies
        .find_by_id(vacancy_id)
        .await?
        .filter(|vacancy| vacancy.status() == VacancyStatus::Published))
}

/// Maintains [`ApplicationView`] rows.
pub struct ApplicationViewProjector {
    applications: Arc<dyn ApplicationLookup>,
    vacancies: Arc<dyn AggregateReader<Vacancy>>,
    resumes: Arc<dyn AggregateReader<Resume>>,
    views: Arc<dyn ReadModelRepository<ApplicationView>>,
    text: ExcerptRenderer,
}

impl ApplicationViewProjector {
    #[must_use]
    pub fn new(
        applications: Arc<dyn ApplicationLookup>,
        vacancies: Arc<dyn AggregateReader<Vacancy>>,
        resumes: Arc<dyn AggregateReader<Resume>>,
        views: Arc<dyn ReadModelRepository<ApplicationView>>,
        text: ExcerptRenderer,
    ) -> Self {
        Self {
            applications,
            vacancies,
            resumes,
            views,
            text,
        }
    }

    async fn refresh(&self, application: &JobApplication) -> Result<(), DomainError> {
        let application_id = application.aggregate_id();
        if !application.is_active() {
            return self.drop_view(application_id).await;
        }
        let vacancy = live_vacancy(self.vacancies.as_ref(), application.vacancy_id()).await?;
        let resume = self.resumes.find_by_id(application.resume_id()).await?;
        if let (Some(vacancy), Some(resume)) = (vacancy, resume) {
            self.views
                .upsert(ApplicationView::build(
                    application,
                    &vacancy,
                    &resume,
                    &self.text,
                ))
                .await?;
            debug!(%application_id, "application view refreshed");
            Ok(())
        } else {
            self.drop_view(application_id).await
        }
    }

    async fn refresh_all(&self, applications: Vec<JobApplication>) -> Result<(), DomainError> {
        for application in &applications {
            self.refresh(application).await?;
        }
        Ok(())
    }

    async fn drop_view(&self, application_id: Uuid) -> Result<(), DomainError> {
        if self.views.remove(&application_id).await? {
            debug!(%application_id, "application view removed");
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<ApplicationEvent> for ApplicationViewProjector {
    fn handler_name(&self) -> &'static str {
        "application_view_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            APPLICATION_SUBMITTED_EVENT_TYPE,
            APPLICATION_WITHDRAWN_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &ApplicationEvent) -> Result<(), DomainError> {
        let application_id = event.application_id();
        match self.applications.find_by_id(application_id).await? {
            Some(application) => self.refresh(&application).await,
            None => {
                warn!(%application_id, event_type = event.kind.event_type(), "application no longer exists");
                self.drop_view(application_id).await
            }
        }
    }
}

#[async_trait]
impl EventHandler<VacancyEvent> for ApplicationViewProjector {
    fn handler_name(&self) -> &'static str {
        "application_view_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            VACANCY_PUBLISHED_EVENT_TYPE,
            VACANCY_ARCHIVED_EVENT_TYPE,
            VACANCY_UPDATED_EVENT_TYPE,
            VACANCY_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &VacancyEvent) -> Result<(), DomainError> {
        let vacancy_id = event.vacancy_id();
        if let VacancyEventKind::VacancyDeleted(_) = event.kind {
            let removed = self
                .views
                .remove_where(&|view: &ApplicationView| view.vacancy_id == vacancy_id)
                .await?;
            debug!(%vacancy_id, removed, "application views removed with vacancy");
            return Ok(());
        }
        let applications = self.applications.find_by_vacancy(vacancy_id).await?;
        self.refresh_all(applications).await
    }
}

#[async_trait]
impl EventHandler<ResumeEvent> for ApplicationViewProjector {
    fn handler_name(&self) -> &'static str {
        "application_view_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![RESUME_UPDATED_EVENT_TYPE, RESUME_DELETED_EVENT_TYPE])
    }

    async fn handle(&self, event: &ResumeEvent) -> Result<(), DomainError> {
        let resume_id = event.resume_id();
        if let ResumeEventKind::ResumeDeleted(_) = event.kind {
            let removed = self
                .views
                .remove_where(&|view: &ApplicationView| view.resume_id == resume_id)
                .await?;
            debug!(%resume_id, removed, "application views removed with resume");
            return Ok(());
        }
        let applications = self.applications.find_by_resume(resume_id).await?;
        self.refresh_all(applications).await
    }
}

/// Maintains one [`VacancyApplicationSummary`] per published vacancy that
/// has received applications.
pub struct VacancyApplicationSummaryProjector {
    applications: Arc<dyn ApplicationLookup>,
    vacancies: Arc<dyn AggregateReader<Vacancy>>,
    resumes: Arc<dyn AggregateReader<Resume>>,
    summaries: Arc<dyn ReadModelRepository<VacancyApplicationSummary>>,
}

impl VacancyApplicationSummaryProjector {
    #[must_use]
    pub fn new(
        applications: Arc<dyn ApplicationLookup>,
        vacancies: Arc<dyn AggregateReader<Vacancy>>,
        resumes: Arc<dyn AggregateReader<Resume>>,
        summaries: Arc<dyn ReadModelRepository<VacancyApplicationSummary>>,
    ) -> Self {
        Self {
            applications,
            vacancies,
            resumes,
            summaries,
        }
    }

    /// Applications to `vacancy_id` whose resume still exists.
    async fn counted_applications(
        &self,
        vacancy_id: Uuid,
    ) -> Result<Vec<JobApplication>, DomainError> {
        let applications = self.applications.find_by_vacancy(vacancy_id).await?;
        let mut live_resumes = HashSet::new();
        for resume_id in applications.iter().map(JobApplication::resume_id) {
            if !live_resumes.contains(&resume_id)
                && self.resumes.find_by_id(resume_id).await?.is_some()
            {
                live_resumes.insert(resume_id);
            }
        }
        Ok(applications
            .into_iter()
            .filter(|application| live_resumes.contains(&application.resume_id()))
            .collect())
    }

    async fn recompute(&self, vacancy_id: Uuid) -> Result<(), DomainError> {
        let Some(vacancy) = live_vacancy(self.vacancies.as_ref(), vacancy_id).await? else {
            return self.drop_summary(vacancy_id).await;
        };
        let applications = self.counted_applications(vacancy_id).await?;
        if applications.is_empty() {
            return self.drop_summary(vacancy_id).await;
        }
        let summary = VacancyApplicationSummary::build(&vacancy, &applications);
        debug!(%vacancy_id, submitted = summary.submitted_count, "application summary recomputed");
        self.summaries.upsert(summary).await
    }

    async fn drop_summary(&self, vacancy_id: Uuid) -> Result<(), DomainError> {
        if self.summaries.remove(&vacancy_id).await? {
            debug!(%vacancy_id, "application summary removed");
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler<ApplicationEvent> for VacancyApplicationSummaryProjector {
    fn handler_name(&self) -> &'static str {
        "vacancy_application_summary_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            APPLICATION_SUBMITTED_EVENT_TYPE,
            APPLICATION_WITHDRAWN_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &ApplicationEvent) -> Result<(), DomainError> {
        let application_id = event.application_id();
        match self.applications.find_by_id(application_id).await? {
            Some(application) => self.recompute(application.vacancy_id()).await,
            None => {
                warn!(%application_id, event_type = event.kind.event_type(), "application no longer exists");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl EventHandler<VacancyEvent> for VacancyApplicationSummaryProjector {
    fn handler_name(&self) -> &'static str {
        "vacancy_application_summary_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::Many(vec![
            VACANCY_PUBLISHED_EVENT_TYPE,
            VACANCY_ARCHIVED_EVENT_TYPE,
            VACANCY_DELETED_EVENT_TYPE,
        ])
    }

    async fn handle(&self, event: &VacancyEvent) -> Result<(), DomainError> {
        self.recompute(event.vacancy_id()).await
    }
}

#[async_trait]
impl EventHandler<ResumeEvent> for VacancyApplicationSummaryProjector {
    fn handler_name(&self) -> &'static str {
        "vacancy_application_summary_projector"
    }

    fn handled_event_types(&self) -> HandledEventTypes {
        HandledEventTypes::One(RESUME_DELETED_EVENT_TYPE)
    }

    async fn handle(&self, event: &ResumeEvent) -> Result<(), DomainError> {
        let mut vacancy_ids: Vec<Uuid> = self
            .applications
            .find_by_resume(event.resume_id())
            .await?
            .iter()
            .map(JobApplication::vacancy_id)
            .collect();
        vacancy_ids.sort_unstable();
        vacancy_ids.dedup();
        for vacancy_id in vacancy_ids {
            self.recompute(vacancy_id).await?;
        }
        Ok(())
    }
}
