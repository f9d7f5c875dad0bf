//! Command handlers for the Vacancy context.
//!
//! Each handler loads the vacancy, runs the domain operation, and stages the
//! result on the repository's unit of work. Committing and dispatching the
//! returned events is the caller's job.

use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::directory::UserDirectory;
use jobboard_core::error::DomainError;
use jobboard_core::repository::AggregateRepository;
use jobboard_core::value_objects::{
    ContactInput, Description, EmploymentType, EmploymentTypeSet, LocationInput, Title,
    validate_salary,
};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{Vacancy, VacancyContent};
use crate::domain::commands::{
    ArchiveVacancy, CreateVacancy, DeleteVacancy, PublishVacancy, RegisterVacancy,
    SetVacancyCategory, UpdateVacancy,
};
use crate::domain::events::VacancyEvent;
use crate::domain::services::VacancyFactory;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct VacancyCommandResult {
    /// The vacancy affected by the command.
    pub aggregate_id: Uuid,
    /// Events to dispatch once the unit of work commits.
    pub events: Vec<VacancyEvent>,
}

async fn load(
    repo: &dyn AggregateRepository<Vacancy>,
    vacancy_id: Uuid,
) -> Result<Vacancy, DomainError> {
    repo.find_by_id(vacancy_id)
        .await?
        .ok_or(DomainError::not_found(Vacancy::AGGREGATE_TYPE, vacancy_id))
}

/// Stages `vacancy` if the command changed it and hands back its events.
async fn stage(
    repo: &dyn AggregateRepository<Vacancy>,
    mut vacancy: Vacancy,
) -> Result<VacancyCommandResult, DomainError> {
    let events = vacancy.take_uncommitted_events();
    if !events.is_empty() {
        repo.mark_updated(&vacancy).await?;
    }
    Ok(VacancyCommandResult {
        aggregate_id: vacancy.aggregate_id(),
        events,
    })
}

fn parse_employment_types(codes: &[String]) -> Result<Vec<EmploymentType>, DomainError> {
    codes
        .iter()
        .map(|code| EmploymentType::from_code(code).map_err(DomainError::from))
        .collect()
}

/// Handles `CreateVacancy`: validates the content, checks the employer, and
/// stages the new draft.
///
/// # Errors
///
/// Returns `vacancy.already_exists` when the id is taken,
/// `DomainError::Validation` for malformed input, the factory's errors for
/// an ineligible user, or repository errors.
pub async fn handle_create_vacancy(
    command: &CreateVacancy,
    clock: &dyn Clock,
    directory: &dyn UserDirectory,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    if repo.find_by_id(command.vacancy_id).await?.is_some() {
        return Err(DomainError::conflict(
            "vacancy.already_exists",
            format!("vacancy {} already exists", command.vacancy_id),
        ));
    }
    let content = VacancyContent {
        title: Title::new(&command.title)?,
        description: Description::new(&command.description)?,
        salary: validate_salary(command.salary.as_ref())?,
        location: command.location.validate()?,
        recruiter: command.recruiter.validate()?,
        employment_types: EmploymentTypeSet::from_codes(&command.employment_types)?,
    };
    let mut vacancy = VacancyFactory::new(directory)
        .create(
            command.vacancy_id,
            command.acting_user_id,
            content,
            command.correlation_id,
            clock,
        )
        .await?;

    let events = vacancy.take_uncommitted_events();
    repo.add(&vacancy).await?;
    info!(
        vacancy_id = %command.vacancy_id,
        company_id = %vacancy.company_id(),
        "vacancy drafted"
    );
    Ok(VacancyCommandResult {
        aggregate_id: command.vacancy_id,
        events,
    })
}

/// Handles `RegisterVacancy`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown vacancy, or the
/// transition's `Conflict`.
pub async fn handle_register_vacancy(
    command: &RegisterVacancy,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let mut vacancy = load(repo, command.vacancy_id).await?;
    vacancy.register(command.acting_user_id, command.correlation_id, clock)?;
    info!(vacancy_id = %command.vacancy_id, "vacancy registered");
    stage(repo, vacancy).await
}

/// Handles `SetVacancyCategory`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown vacancy, or
/// `Conflict` unless the vacancy is registered.
pub async fn handle_set_vacancy_category(
    command: &SetVacancyCategory,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let mut vacancy = load(repo, command.vacancy_id).await?;
    vacancy.set_category(command.category_id, clock)?;
    vacancy.record_update(command.correlation_id, clock);
    stage(repo, vacancy).await
}

/// Handles `PublishVacancy`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown vacancy, the
/// transition's `Conflict`, or `Problem` when no category is set.
pub async fn handle_publish_vacancy(
    command: &PublishVacancy,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let mut vacancy = load(repo, command.vacancy_id).await?;
    vacancy.publish(command.correlation_id, clock)?;
    info!(vacancy_id = %command.vacancy_id, "vacancy published");
    stage(repo, vacancy).await
}

/// Handles `ArchiveVacancy`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown vacancy, or the
/// transition's `Conflict`.
pub async fn handle_archive_vacancy(
    command: &ArchiveVacancy,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let mut vacancy = load(repo, command.vacancy_id).await?;
    vacancy.archive(command.correlation_id, clock)?;
    info!(vacancy_id = %command.vacancy_id, "vacancy archived");
    stage(repo, vacancy).await
}

/// Handles `UpdateVacancy`: validates every supplied field, then applies
/// them and records at most one `VacancyUpdated` event.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed input before anything is
/// changed, `AggregateNotFound` for an unknown vacancy, or the first
/// mutator's error. Nothing is staged on error.
pub async fn handle_update_vacancy(
    command: &UpdateVacancy,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let title = command.title.as_deref().map(Title::new).transpose()?;
    let description = command
        .description
        .as_deref()
        .map(Description::new)
        .transpose()?;
    let salary = command
        .salary
        .as_ref()
        .map(|salary| validate_salary(salary.as_ref()))
        .transpose()?;
    let location = command
        .location
        .as_ref()
        .map(LocationInput::validate)
        .transpose()?;
    let recruiter = command
        .recruiter
        .as_ref()
        .map(ContactInput::validate)
        .transpose()?;
    let additions = parse_employment_types(&command.add_employment_types)?;
    let removals = parse_employment_types(&command.remove_employment_types)?;

    let mut vacancy = load(repo, command.vacancy_id).await?;
    if let Some(title) = title {
        vacancy.update_title(title, clock)?;
    }
    if let Some(description) = description {
        vacancy.update_description(description, clock)?;
    }
    if let Some(salary) = salary {
        vacancy.update_salary(salary, clock)?;
    }
    if let Some(location) = location {
        vacancy.update_location(location, clock)?;
    }
    if let Some(recruiter) = recruiter {
        vacancy.update_recruiter(recruiter, clock)?;
    }
    for employment_type in additions {
        vacancy.add_employment_type(employment_type, clock)?;
    }
    for employment_type in removals {
        vacancy.remove_employment_type(employment_type, clock)?;
    }

    if vacancy.record_update(command.correlation_id, clock) {
        info!(vacancy_id = %command.vacancy_id, "vacancy updated");
    }
    stage(repo, vacancy).await
}

/// Handles `DeleteVacancy`: emits `VacancyDeleted` and stages removal.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown vacancy, or
/// `Conflict` while the vacancy is published.
pub async fn handle_delete_vacancy(
    command: &DeleteVacancy,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Vacancy>,
) -> Result<VacancyCommandResult, DomainError> {
    let mut vacancy = load(repo, command.vacancy_id).await?;
    vacancy.mark_deleted(command.correlation_id, clock)?;
    let events = vacancy.take_uncommitted_events();
    repo.remove(&vacancy).await?;
    info!(vacancy_id = %command.vacancy_id, "vacancy deleted");
    Ok(VacancyCommandResult {
        aggregate_id: command.vacancy_id,
        events,
    })
}
