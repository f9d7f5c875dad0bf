//! Static handler wiring.
//!
//! Every projector is constructed here, once, and registered with the
//! dispatcher of each event family it listens to. Registration order is the
//! order handlers run in.

use std::sync::Arc;

use jobboard_applications::application::projectors::{
    ApplicationViewProjector, VacancyApplicationSummaryProjector,
};
use jobboard_applications::application::read_models::{
    ApplicationView, VacancyApplicationSummary,
};
use jobboard_applications::domain::aggregates::JobApplication;
use jobboard_applications::domain::events::ApplicationEvent;
use jobboard_applications::domain::repository::ApplicationLookup;
use jobboard_core::error::DomainError;
use jobboard_core::handler::EventHandler;
use jobboard_core::render::ExcerptRenderer;
use jobboard_core::repository::AggregateReader;
use jobboard_eventing::{EventDispatcher, HandlerRegistry};
use jobboard_resume::application::projectors::{ResumeListingProjector, UserResumeProjector};
use jobboard_resume::application::read_models::{ResumeListing, UserResume};
use jobboard_resume::domain::aggregates::Resume;
use jobboard_resume::domain::events::ResumeEvent;
use jobboard_store::{MemoryDatabase, MemoryReadModelStore};
use jobboard_vacancy::application::projectors::{CompanyVacancyProjector, VacancyListingProjector};
use jobboard_vacancy::application::read_models::{CompanyVacancy, VacancyListing};
use jobboard_vacancy::domain::aggregates::Vacancy;
use jobboard_vacancy::domain::events::VacancyEvent;
use tracing::debug;

/// Every read-model store the job board maintains.
#[derive(Debug, Clone, Default)]
pub struct ReadModels {
    pub vacancy_listings: MemoryReadModelStore<VacancyListing>,
    pub company_vacancies: MemoryReadModelStore<CompanyVacancy>,
    pub resume_listings: MemoryReadModelStore<ResumeListing>,
    pub user_resumes: MemoryReadModelStore<UserResume>,
    pub application_views: MemoryReadModelStore<ApplicationView>,
    pub application_summaries: MemoryReadModelStore<VacancyApplicationSummary>,
}

/// One dispatcher per event family.
#[derive(Debug, Clone)]
pub struct Dispatchers {
    pub vacancy: EventDispatcher<VacancyEvent>,
    pub resume: EventDispatcher<ResumeEvent>,
    pub application: EventDispatcher<ApplicationEvent>,
}

impl Dispatchers {
    /// Builds every projector over `database` and `read_models` and
    /// registers it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if an aggregate table cannot be
    /// resolved.
    pub fn wire(
        database: &MemoryDatabase,
        read_models: &ReadModels,
        text: &ExcerptRenderer,
    ) -> Result<Self, DomainError> {
        let vacancies: Arc<dyn AggregateReader<Vacancy>> = Arc::new(database.table::<Vacancy>()?);
        let resumes: Arc<dyn AggregateReader<Resume>> = Arc::new(database.table::<Resume>()?);
        let applications: Arc<dyn ApplicationLookup> =
            Arc::new(database.table::<JobApplication>()?);

        let vacancy_listing = Arc::new(VacancyListingProjector::new(
            Arc::clone(&vacancies),
            Arc::new(read_models.vacancy_listings.clone()),
            text.clone(),
        ));
        let company_vacancy = Arc::new(CompanyVacancyProjector::new(
            Arc::clone(&vacancies),
            Arc::new(read_models.company_vacancies.clone()),
        ));
        let resume_listing = Arc::new(ResumeListingProjector::new(
            Arc::clone(&resumes),
            Arc::new(read_models.resume_listings.clone()),
            text.clone(),
        ));
        let user_resume = Arc::new(UserResumeProjector::new(
            Arc::clone(&resumes),
            Arc::new(read_models.user_resumes.clone()),
        ));
        let application_view = Arc::new(ApplicationViewProjector::new(
            Arc::clone(&applications),
            Arc::clone(&vacancies),
            Arc::clone(&resumes),
            Arc::new(read_models.application_views.clone()),
            text.clone(),
        ));
        let application_summary = Arc::new(VacancyApplicationSummaryProjector::new(
            applications,
            vacancies,
            resumes,
            Arc::new(read_models.application_summaries.clone()),
        ));

        let vacancy = HandlerRegistry::<VacancyEvent>::builder()
            .register(vacancy_listing)
            .register(company_vacancy)
            .register(Arc::clone(&application_view) as Arc<dyn EventHandler<VacancyEvent>>)
            .register(Arc::clone(&application_summary) as Arc<dyn EventHandler<VacancyEvent>>)
            .build();
        let resume = HandlerRegistry::<ResumeEvent>::builder()
            .register(resume_listing)
            .register(user_resume)
            .register(Arc::clone(&application_view) as Arc<dyn EventHandler<ResumeEvent>>)
            .register(Arc::clone(&application_summary) as Arc<dyn EventHandler<ResumeEvent>>)
            .build();
        let application = HandlerRegistry::<ApplicationEvent>::builder()
            .register(application_view as Arc<dyn EventHandler<ApplicationEvent>>)
            .register(application_summary as Arc<dyn EventHandler<ApplicationEvent>>)
            .build();

        debug!(
            vacancy_handlers = vacancy.len(),
            resume_handlers = resume.len(),
            application_handlers = application.len(),
            "event handlers wired"
        );
        Ok(Self {
            vacancy: EventDispatcher::new(vacancy),
            resume: EventDispatcher::new(resume),
            application: EventDispatcher::new(application),
        })
    }
}
