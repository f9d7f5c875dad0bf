//! The job board command service.
//!
//! Each command runs in its own unit of work. A commit rejected for a stale
//! version is retried from a fresh read, up to the configured number of
//! attempts. Once the commit succeeds, the events are dispatched on a
//! spawned task and the caller waits for the report.

use std::future::Future;
use std::sync::Arc;

use jobboard_applications::application::command_handlers::{
    ApplicationCommandResult, ApplicationSources, handle_submit_application,
    handle_withdraw_application,
};
use jobboard_applications::domain::aggregates::JobApplication;
use jobboard_applications::domain::commands::{SubmitApplication, WithdrawApplication};
use jobboard_applications::domain::events::ApplicationEvent;
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::command::Command;
use jobboard_core::directory::UserDirectory;
use jobboard_core::error::DomainError;
use jobboard_core::event::DomainEvent;
use jobboard_core::render::{ExcerptRenderer, PlainTextRenderer};
use jobboard_core::repository::UnitOfWork;
use jobboard_eventing::{DispatchReport, EventDispatcher};
use jobboard_resume::application::command_handlers::{
    ResumeCommandResult, handle_add_education, handle_add_work_experience, handle_create_resume,
    handle_delete_resume, handle_draft_resume, handle_publish_resume, handle_remove_education,
    handle_remove_work_experience, handle_update_education, handle_update_resume,
    handle_update_work_experience,
};
use jobboard_resume::domain::aggregates::Resume;
use jobboard_resume::domain::commands::{
    AddEducation, AddWorkExperience, CreateResume, DeleteResume, DraftResume, PublishResume,
    RemoveEducation, RemoveWorkExperience, UpdateEducation, UpdateResume, UpdateWorkExperience,
};
use jobboard_resume::domain::events::ResumeEvent;
use jobboard_store::{MemoryAggregateRepository, MemoryDatabase};
use jobboard_vacancy::application::command_handlers::{
    VacancyCommandResult, handle_archive_vacancy, handle_create_vacancy, handle_delete_vacancy,
    handle_publish_vacancy, handle_register_vacancy, handle_set_vacancy_category,
    handle_update_vacancy,
};
use jobboard_vacancy::domain::aggregates::Vacancy;
use jobboard_vacancy::domain::commands::{
    ArchiveVacancy, CreateVacancy, DeleteVacancy, PublishVacancy, RegisterVacancy,
    SetVacancyCategory, UpdateVacancy,
};
use jobboard_vacancy::domain::events::VacancyEvent;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::wiring::{Dispatchers, ReadModels};

type Repo<A> = Arc<MemoryAggregateRepository<A>>;

/// What a caller learns about a committed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReceipt {
    /// The aggregate the command acted on.
    pub aggregate_id: Uuid,
    /// Ids of the events the command committed, in emission order.
    pub event_ids: Vec<Uuid>,
    /// Outcome of projecting those events. Failures here never fail the
    /// command.
    pub dispatch: DispatchReport,
}

/// Splits a handler result into the aggregate id and its events.
trait HandlerOutcome<E> {
    fn into_parts(self) -> (Uuid, Vec<E>);
}

impl HandlerOutcome<VacancyEvent> for VacancyCommandResult {
    fn into_parts(self) -> (Uuid, Vec<VacancyEvent>) {
        (self.aggregate_id, self.events)
    }
}

impl HandlerOutcome<ResumeEvent> for ResumeCommandResult {
    fn into_parts(self) -> (Uuid, Vec<ResumeEvent>) {
        (self.aggregate_id, self.events)
    }
}

impl HandlerOutcome<ApplicationEvent> for ApplicationCommandResult {
    fn into_parts(self) -> (Uuid, Vec<ApplicationEvent>) {
        (self.aggregate_id, self.events)
    }
}

/// Runs job board commands against the in-memory store and keeps the read
/// models up to date.
pub struct JobBoard {
    database: MemoryDatabase,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
    read_models: ReadModels,
    dispatchers: Dispatchers,
    commit_attempts: u32,
}

impl std::fmt::Debug for JobBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobBoard")
            .field("database", &self.database)
            .field("commit_attempts", &self.commit_attempts)
            .finish_non_exhaustive()
    }
}

impl JobBoard {
    /// Creates a job board with an empty store and every projector wired.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the handler wiring fails.
    pub fn new(
        config: &AppConfig,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
        renderer: Arc<dyn PlainTextRenderer>,
    ) -> Result<Self, DomainError> {
        let database = MemoryDatabase::new();
        let read_models = ReadModels::default();
        let text = ExcerptRenderer::new(renderer, config.excerpt_chars);
        let dispatchers = Dispatchers::wire(&database, &read_models, &text)?;
        Ok(Self {
            database,
            directory,
            clock,
            read_models,
            dispatchers,
            commit_attempts: config.commit_attempts.max(1),
        })
    }

    /// Replaces the dispatchers, keeping the store and read models.
    #[must_use]
    pub fn with_dispatchers(mut self, dispatchers: Dispatchers) -> Self {
        self.dispatchers = dispatchers;
        self
    }

    /// The write-model store.
    #[must_use]
    pub fn database(&self) -> &MemoryDatabase {
        &self.database
    }

    /// The read-model stores, for the query handlers.
    #[must_use]
    pub fn read_models(&self) -> &ReadModels {
        &self.read_models
    }

    /// The dispatchers events are routed through.
    #[must_use]
    pub fn dispatchers(&self) -> &Dispatchers {
        &self.dispatchers
    }

    #[instrument(
        skip_all,
        fields(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
            acting_user_id = %command.acting_user_id(),
        )
    )]
    async fn execute<A, E, R, F, Fut>(
        &self,
        command: &dyn Command,
        dispatcher: &EventDispatcher<E>,
        attempt: F,
    ) -> Result<CommandReceipt, DomainError>
    where
        A: AggregateRoot,
        E: DomainEvent,
        R: HandlerOutcome<E>,
        F: Fn(Repo<A>) -> Fut,
        Fut: Future<Output = Result<R, DomainError>>,
    {
        info!("handling command");
        let mut tries = 0;
        let (aggregate_id, events) = loop {
            tries += 1;
            let unit_of_work = self.database.begin();
            let outcome = attempt(unit_of_work.repository::<A>()?).await?;
            match unit_of_work.commit().await {
                Ok(()) => break outcome.into_parts(),
                Err(err) if err.is_retryable() && tries < self.commit_attempts => {
                    warn!(attempt = tries, error = %err, "commit rejected, retrying from a fresh read");
                }
                Err(err) => return Err(err),
            }
        };

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.metadata().event_id).collect();
        let dispatch = if events.is_empty() {
            DispatchReport::default()
        } else {
            dispatcher.dispatch_detached(events).join().await
        };
        if !dispatch.is_clean() {
            warn!(
                %aggregate_id,
                failures = dispatch.failures.len(),
                "command committed but some read models are stale"
            );
        }
        Ok(CommandReceipt {
            aggregate_id,
            event_ids,
            dispatch,
        })
    }

    /// Creates a draft vacancy.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn create_vacancy(
        &self,
        command: &CreateVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        let directory = self.directory.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_create_vacancy(command, clock, directory, &*repo).await
            },
        )
        .await
    }

    /// Registers a draft vacancy.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn register_vacancy(
        &self,
        command: &RegisterVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_register_vacancy(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Assigns a category to a vacancy.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn set_vacancy_category(
        &self,
        command: &SetVacancyCategory,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_set_vacancy_category(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Publishes a registered or archived vacancy.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn publish_vacancy(
        &self,
        command: &PublishVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_publish_vacancy(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Archives a published vacancy.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn archive_vacancy(
        &self,
        command: &ArchiveVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_archive_vacancy(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Edits vacancy fields.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn update_vacancy(
        &self,
        command: &UpdateVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_update_vacancy(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Deletes a vacancy that is not published.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn delete_vacancy(
        &self,
        command: &DeleteVacancy,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.vacancy,
            move |repo: Repo<Vacancy>| async move {
                handle_delete_vacancy(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Creates a draft resume.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn create_resume(&self, command: &CreateResume) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        let directory = self.directory.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_create_resume(command, clock, directory, &*repo).await
            },
        )
        .await
    }

    /// Publishes a draft resume.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn publish_resume(
        &self,
        command: &PublishResume,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_publish_resume(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Returns a published resume to draft.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn draft_resume(&self, command: &DraftResume) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move { handle_draft_resume(command, clock, &*repo).await },
        )
        .await
    }

    /// Edits resume fields.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn update_resume(&self, command: &UpdateResume) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_update_resume(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Adds a work experience entry to a resume.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn add_work_experience(
        &self,
        command: &AddWorkExperience,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_add_work_experience(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Replaces a work experience entry.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn update_work_experience(
        &self,
        command: &UpdateWorkExperience,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_update_work_experience(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Removes a work experience entry.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn remove_work_experience(
        &self,
        command: &RemoveWorkExperience,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_remove_work_experience(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Adds an education entry to a resume.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn add_education(&self, command: &AddEducation) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_add_education(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Replaces an education entry.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn update_education(
        &self,
        command: &UpdateEducation,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_update_education(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Removes an education entry.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn remove_education(
        &self,
        command: &RemoveEducation,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_remove_education(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Deletes a resume.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn delete_resume(&self, command: &DeleteResume) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.resume,
            move |repo: Repo<Resume>| async move {
                handle_delete_resume(command, clock, &*repo).await
            },
        )
        .await
    }

    /// Applies to a published vacancy with a published resume.
    ///
    /// Vacancies and resumes are read from committed state.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn submit_application(
        &self,
        command: &SubmitApplication,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        let vacancies = self.database.table::<Vacancy>()?;
        let resumes = self.database.table::<Resume>()?;
        let sources = ApplicationSources {
            directory: self.directory.as_ref(),
            vacancies: &vacancies,
            resumes: &resumes,
        };
        self.execute(
            command,
            &self.dispatchers.application,
            move |repo: Repo<JobApplication>| async move {
                handle_submit_application(command, clock, sources, &*repo).await
            },
        )
        .await
    }

    /// Withdraws a submitted application.
    ///
    /// # Errors
    ///
    /// Returns whatever the command handler or the commit returns.
    pub async fn withdraw_application(
        &self,
        command: &WithdrawApplication,
    ) -> Result<CommandReceipt, DomainError> {
        let clock = self.clock.as_ref();
        self.execute(
            command,
            &self.dispatchers.application,
            move |repo: Repo<JobApplication>| async move {
                handle_withdraw_application(command, clock, &*repo).await
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use jobboard_core::error::ErrorKind;
    use jobboard_core::repository::AggregateReader;
    use jobboard_core::value_objects::{ContactInput, LocationInput};
    use jobboard_test_support::{FixedClock, PassthroughRenderer, StubUserDirectory};

    use super::*;

    fn board(commit_attempts: u32) -> (JobBoard, Uuid) {
        let directory = StubUserDirectory::new();
        let employer = directory.add_employer(Uuid::new_v4());
        let config = AppConfig {
            commit_attempts,
            ..AppConfig::default()
        };
        let board = JobBoard::new(
            &config,
            Arc::new(directory),
            Arc::new(FixedClock::default()),
            Arc::new(PassthroughRenderer),
        )
        .unwrap();
        (board, employer)
    }

    async fn draft_vacancy(board: &JobBoard, employer: Uuid) -> Uuid {
        let vacancy_id = Uuid::new_v4();
        board
            .create_vacancy(&CreateVacancy {
                correlation_id: Uuid::new_v4(),
                acting_user_id: employer,
                vacancy_id,
                title: "Backend Engineer".into(),
                description: "Build the *matching* service.".into(),
                salary: None,
                location: LocationInput {
                    country: "Spain".into(),
                    city: "Madrid".into(),
                    ..LocationInput::default()
                },
                recruiter: ContactInput {
                    name: "Rita Recruiter".into(),
                    email: "rita@example.com".into(),
                    phone: None,
                },
                employment_types: vec!["full_time".into()],
            })
            .await
            .unwrap();
        vacancy_id
    }

    fn retitle(employer: Uuid, vacancy_id: Uuid, title: &str) -> UpdateVacancy {
        UpdateVacancy {
            correlation_id: Uuid::new_v4(),
            acting_user_id: employer,
            vacancy_id,
            title: Some(title.into()),
            ..UpdateVacancy::default()
        }
    }

    /// Runs `command`, committing `rival` behind its back on the first try.
    async fn update_with_rival(
        board: &JobBoard,
        command: &UpdateVacancy,
        rival: &UpdateVacancy,
    ) -> (Result<CommandReceipt, DomainError>, u32) {
        let tries = AtomicU32::new(0);
        let clock = FixedClock::default();
        let (tries_ref, clock_ref, database) = (&tries, &clock, board.database());
        let result = board
            .execute(
                command,
                &board.dispatchers.vacancy,
                move |repo: Repo<Vacancy>| async move {
                    let outcome = handle_update_vacancy(command, clock_ref, &*repo).await?;
                    if tries_ref.fetch_add(1, Ordering::SeqCst) == 0 {
                        let competing = database.begin();
                        let competing_repo = competing.repository::<Vacancy>()?;
                        handle_update_vacancy(rival, clock_ref, &*competing_repo).await?;
                        competing.commit().await?;
                    }
                    Ok(outcome)
                },
            )
            .await;
        (result, tries.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_conflicting_commit_is_retried_from_fresh_read() {
        // Arrange
        let (board, employer) = board(3);
        let vacancy_id = draft_vacancy(&board, employer).await;
        let command = retitle(employer, vacancy_id, "Staff Engineer");
        let rival = UpdateVacancy {
            description: Some("Changed elsewhere.".into()),
            ..retitle(employer, vacancy_id, "Backend Engineer")
        };

        // Act
        let (result, tries) = update_with_rival(&board, &command, &rival).await;

        // Assert
        let receipt = result.unwrap();
        assert_eq!(tries, 2);
        assert_eq!(receipt.event_ids.len(), 1);
        let stored = board
            .database()
            .table::<Vacancy>()
            .unwrap()
            .find_by_id(vacancy_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.content().title.as_str(), "Staff Engineer");
        assert_eq!(stored.content().description.markdown(), "Changed elsewhere.");
        assert_eq!(stored.version(), 3);
    }

    #[tokio::test]
    async fn test_conflict_surfaces_when_attempts_run_out() {
        // Arrange
        let (board, employer) = board(1);
        let vacancy_id = draft_vacancy(&board, employer).await;
        let command = retitle(employer, vacancy_id, "Staff Engineer");
        let rival = retitle(employer, vacancy_id, "Principal Engineer");

        // Act
        let (result, tries) = update_with_rival(&board, &command, &rival).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(tries, 1);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_business_errors_pass_through() {
        // Arrange
        let (board, employer) = board(3);
        let vacancy_id = draft_vacancy(&board, employer).await;

        // Act
        let err = board
            .publish_vacancy(&PublishVacancy {
                correlation_id: Uuid::new_v4(),
                acting_user_id: employer,
                vacancy_id,
            })
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.code(), "vacancy.invalid_transition");
    }

    #[tokio::test]
    async fn test_receipt_lists_committed_events() {
        // Arrange
        let (board, employer) = board(3);
        let vacancy_id = draft_vacancy(&board, employer).await;

        // Act
        let receipt = board
            .register_vacancy(&RegisterVacancy {
                correlation_id: Uuid::new_v4(),
                acting_user_id: employer,
                vacancy_id,
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(receipt.aggregate_id, vacancy_id);
        assert_eq!(receipt.event_ids.len(), 1);
        assert!(receipt.dispatch.is_clean());
        assert!(receipt.dispatch.delivered > 0);
    }
}
