//! Command handlers for the Applications context.

use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::directory::UserDirectory;
use jobboard_core::error::DomainError;
use jobboard_core::repository::AggregateReader;
use jobboard_core::value_objects::Description;
use jobboard_resume::domain::aggregates::Resume;
use jobboard_vacancy::domain::aggregates::Vacancy;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{ApplicationParties, JobApplication};
use crate::domain::commands::{SubmitApplication, WithdrawApplication};
use crate::domain::events::ApplicationEvent;
use crate::domain::repository::JobApplicationRepository;
use crate::domain::services::ApplicationPolicy;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ApplicationCommandResult {
    /// The application affected by the command.
    pub aggregate_id: Uuid,
    /// Events to dispatch once the unit of work commits.
    pub events: Vec<ApplicationEvent>,
}

/// Read access to the aggregates an application refers to.
#[derive(Clone, Copy)]
pub struct ApplicationSources<'a> {
    pub directory: &'a dyn UserDirectory,
    pub vacancies: &'a dyn AggregateReader<Vacancy>,
    pub resumes: &'a dyn AggregateReader<Resume>,
}

/// Handles `SubmitApplication`.
///
/// # Errors
///
/// Returns `application.already_exists` when the id is taken,
/// `DomainError::Validation` for a malformed cover letter, any
/// `ApplicationPolicy` rejection, or repository errors.
pub async fn handle_submit_application(
    command: &SubmitApplication,
    clock: &dyn Clock,
    sources: ApplicationSources<'_>,
    repo: &dyn JobApplicationRepository,
) -> Result<ApplicationCommandResult, DomainError> {
    if repo.find_by_id(command.application_id).await?.is_some() {
        return Err(DomainError::conflict(
            "application.already_exists",
            format!("application {} already exists", command.application_id),
        ));
    }
    let cover_letter = match command.cover_letter.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(Description::new(text)?),
    };
    let parties = ApplicationParties {
        vacancy_id: command.vacancy_id,
        resume_id: command.resume_id,
        applicant_id: command.acting_user_id,
    };
    let mut application =
        ApplicationPolicy::new(sources.directory, sources.vacancies, sources.resumes, repo)
            .submit(
                command.application_id,
                parties,
                cover_letter,
                command.correlation_id,
                clock,
            )
            .await?;

    let events = application.take_uncommitted_events();
    repo.add(&application).await?;
    info!(
        application_id = %command.application_id,
        vacancy_id = %command.vacancy_id,
        resume_id = %command.resume_id,
        "application submitted"
    );
    Ok(ApplicationCommandResult {
        aggregate_id: command.application_id,
        events,
    })
}

/// Handles `WithdrawApplication`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown application,
/// `Problem` when someone other than the applicant asks, or `Conflict` if it
/// is already withdrawn.
pub async fn handle_withdraw_application(
    command: &WithdrawApplication,
    clock: &dyn Clock,
    repo: &dyn JobApplicationRepository,
) -> Result<ApplicationCommandResult, DomainError> {
    let mut application = repo
        .find_by_id(command.application_id)
        .await?
        .ok_or(DomainError::not_found(
            JobApplication::AGGREGATE_TYPE,
            command.application_id,
        ))?;
    application.withdraw(command.acting_user_id, command.correlation_id, clock)?;
    let events = application.take_uncommitted_events();
    repo.mark_updated(&application).await?;
    info!(application_id = %command.application_id, "application withdrawn");
    Ok(ApplicationCommandResult {
        aggregate_id: command.application_id,
        events,
    })
}
