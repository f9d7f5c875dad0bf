//! Command handlers for the Resume context.
//!
//! Handlers stage their writes on the repository's unit of work and return
//! the events for the caller to dispatch after commit.

use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::directory::UserDirectory;
use jobboard_core::error::DomainError;
use jobboard_core::repository::AggregateRepository;
use jobboard_core::value_objects::{
    ContactInput, DateRange, Description, EmploymentType, EmploymentTypeSet, LocationInput,
    Title, validate_salary,
};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{Resume, ResumeContent};
use crate::domain::commands::{
    AddEducation, AddWorkExperience, CreateResume, DeleteResume, DraftResume, EducationInput,
    PublishResume, RemoveEducation, RemoveWorkExperience, UpdateEducation, UpdateResume,
    UpdateWorkExperience, WorkExperienceInput,
};
use crate::domain::entities::{Education, WorkExperience};
use crate::domain::events::ResumeEvent;
use crate::domain::services::ResumeFactory;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ResumeCommandResult {
    /// The resume affected by the command.
    pub aggregate_id: Uuid,
    /// Events to dispatch once the unit of work commits.
    pub events: Vec<ResumeEvent>,
}

async fn load(
    repo: &dyn AggregateRepository<Resume>,
    resume_id: Uuid,
) -> Result<Resume, DomainError> {
    repo.find_by_id(resume_id)
        .await?
        .ok_or(DomainError::not_found(Resume::AGGREGATE_TYPE, resume_id))
}

async fn stage(
    repo: &dyn AggregateRepository<Resume>,
    mut resume: Resume,
) -> Result<ResumeCommandResult, DomainError> {
    let events = resume.take_uncommitted_events();
    if !events.is_empty() {
        repo.mark_updated(&resume).await?;
    }
    Ok(ResumeCommandResult {
        aggregate_id: resume.aggregate_id(),
        events,
    })
}

/// Records the pending update, if any, then stages the resume.
async fn finish_update(
    repo: &dyn AggregateRepository<Resume>,
    mut resume: Resume,
    correlation_id: Uuid,
    clock: &dyn Clock,
) -> Result<ResumeCommandResult, DomainError> {
    if resume.record_update(correlation_id, clock) {
        info!(resume_id = %resume.aggregate_id(), %correlation_id, "resume updated");
    }
    stage(repo, resume).await
}

fn parse_employment_types(codes: &[String]) -> Result<Vec<EmploymentType>, DomainError> {
    codes
        .iter()
        .map(|code| EmploymentType::from_code(code).map_err(DomainError::from))
        .collect()
}

fn work_experience(
    entry_id: Uuid,
    input: &WorkExperienceInput,
) -> Result<WorkExperience, DomainError> {
    let period = DateRange::new(input.start, input.end)?;
    Ok(WorkExperience::new(
        entry_id,
        &input.company,
        &input.position,
        period,
        input.description.as_deref(),
    )?)
}

fn education(entry_id: Uuid, input: &EducationInput) -> Result<Education, DomainError> {
    let period = DateRange::new(input.start, input.end)?;
    Ok(Education::new(
        entry_id,
        &input.institution,
        &input.degree,
        period,
    )?)
}

/// Handles `CreateResume`.
///
/// # Errors
///
/// Returns `resume.already_exists` when the id is taken,
/// `DomainError::Validation` for malformed input, the factory's errors for a
/// user who is not an applicant, or repository errors.
pub async fn handle_create_resume(
    command: &CreateResume,
    clock: &dyn Clock,
    directory: &dyn UserDirectory,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    if repo.find_by_id(command.resume_id).await?.is_some() {
        return Err(DomainError::conflict(
            "resume.already_exists",
            format!("resume {} already exists", command.resume_id),
        ));
    }
    let content = ResumeContent {
        title: Title::new(&command.title)?,
        about: Description::new(&command.about)?,
        desired_salary: validate_salary(command.desired_salary.as_ref())?,
        location: command.location.validate()?,
        contact: command.contact.validate()?,
        employment_types: EmploymentTypeSet::from_codes(&command.employment_types)?,
    };
    let mut resume = ResumeFactory::new(directory)
        .create(
            command.resume_id,
            command.acting_user_id,
            content,
            command.correlation_id,
            clock,
        )
        .await?;

    let events = resume.take_uncommitted_events();
    repo.add(&resume).await?;
    info!(
        resume_id = %command.resume_id,
        owner_id = %command.acting_user_id,
        "resume drafted"
    );
    Ok(ResumeCommandResult {
        aggregate_id: command.resume_id,
        events,
    })
}

/// Handles `PublishResume`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown resume, or the
/// transition's `Conflict`.
pub async fn handle_publish_resume(
    command: &PublishResume,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let mut resume = load(repo, command.resume_id).await?;
    resume.publish(command.correlation_id, clock)?;
    info!(resume_id = %command.resume_id, "resume published");
    stage(repo, resume).await
}

/// Handles `DraftResume`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown resume, or the
/// transition's `Conflict`.
pub async fn handle_draft_resume(
    command: &DraftResume,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let mut resume = load(repo, command.resume_id).await?;
    resume.draft(command.correlation_id, clock)?;
    info!(resume_id = %command.resume_id, "resume returned to draft");
    stage(repo, resume).await
}

/// Handles `UpdateResume`: validates every supplied field before applying
/// any of them.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed input,
/// `AggregateNotFound` for an unknown resume, or the first mutator's error.
pub async fn handle_update_resume(
    command: &UpdateResume,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let title = command.title.as_deref().map(Title::new).transpose()?;
    let about = command.about.as_deref().map(Description::new).transpose()?;
    let desired_salary = command
        .desired_salary
        .as_ref()
        .map(|salary| validate_salary(salary.as_ref()))
        .transpose()?;
    let location = command
        .location
        .as_ref()
        .map(LocationInput::validate)
        .transpose()?;
    let contact = command
        .contact
        .as_ref()
        .map(ContactInput::validate)
        .transpose()?;
    let additions = parse_employment_types(&command.add_employment_types)?;
    let removals = parse_employment_types(&command.remove_employment_types)?;

    let mut resume = load(repo, command.resume_id).await?;
    if let Some(title) = title {
        resume.update_title(title, clock)?;
    }
    if let Some(about) = about {
        resume.update_about(about, clock)?;
    }
    if let Some(desired_salary) = desired_salary {
        resume.update_desired_salary(desired_salary, clock)?;
    }
    if let Some(location) = location {
        resume.update_location(location, clock)?;
    }
    if let Some(contact) = contact {
        resume.update_contact(contact, clock)?;
    }
    for employment_type in additions {
        resume.add_employment_type(employment_type, clock)?;
    }
    for employment_type in removals {
        resume.remove_employment_type(employment_type, clock)?;
    }
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `AddWorkExperience`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed entry,
/// `AggregateNotFound` for an unknown resume, or `Conflict` for a reused
/// entry id.
pub async fn handle_add_work_experience(
    command: &AddWorkExperience,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let entry = work_experience(command.entry_id, &command.entry)?;
    let mut resume = load(repo, command.resume_id).await?;
    resume.add_work_experience(entry, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `UpdateWorkExperience`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed entry, or
/// `AggregateNotFound` for an unknown resume or entry.
pub async fn handle_update_work_experience(
    command: &UpdateWorkExperience,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let entry = work_experience(command.entry_id, &command.entry)?;
    let mut resume = load(repo, command.resume_id).await?;
    resume.update_work_experience(entry, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `RemoveWorkExperience`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown resume or entry.
pub async fn handle_remove_work_experience(
    command: &RemoveWorkExperience,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let mut resume = load(repo, command.resume_id).await?;
    resume.remove_work_experience(command.entry_id, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `AddEducation`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed entry,
/// `AggregateNotFound` for an unknown resume, or `Conflict` for a reused
/// entry id.
pub async fn handle_add_education(
    command: &AddEducation,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let entry = education(command.entry_id, &command.entry)?;
    let mut resume = load(repo, command.resume_id).await?;
    resume.add_education(entry, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `UpdateEducation`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed entry, or
/// `AggregateNotFound` for an unknown resume or entry.
pub async fn handle_update_education(
    command: &UpdateEducation,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let entry = education(command.entry_id, &command.entry)?;
    let mut resume = load(repo, command.resume_id).await?;
    resume.update_education(entry, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `RemoveEducation`.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown resume or entry.
pub async fn handle_remove_education(
    command: &RemoveEducation,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let mut resume = load(repo, command.resume_id).await?;
    resume.remove_education(command.entry_id, clock)?;
    finish_update(repo, resume, command.correlation_id, clock).await
}

/// Handles `DeleteResume`: emits `ResumeDeleted` and stages removal.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` for an unknown resume.
pub async fn handle_delete_resume(
    command: &DeleteResume,
    clock: &dyn Clock,
    repo: &dyn AggregateRepository<Resume>,
) -> Result<ResumeCommandResult, DomainError> {
    let mut resume = load(repo, command.resume_id).await?;
    resume.mark_deleted(command.correlation_id, clock);
    let events = resume.take_uncommitted_events();
    repo.remove(&resume).await?;
    info!(resume_id = %command.resume_id, "resume deleted");
    Ok(ResumeCommandResult {
        aggregate_id: command.resume_id,
        events,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use jobboard_core::error::ErrorKind;
    use jobboard_core::event::DomainEvent;
    use jobboard_core::repository::UnitOfWork;
    use jobboard_store::MemoryDatabase;
    use jobboard_test_support::{FixedClock, StubUserDirectory};

    use super::*;
    use crate::domain::events::{
        RESUME_CREATED_EVENT_TYPE, RESUME_DELETED_EVENT_TYPE, RESUME_DRAFTED_EVENT_TYPE,
        RESUME_UPDATED_EVENT_TYPE,
    };
    use crate::domain::status::ResumeStatus;

    fn create_command(applicant_id: Uuid) -> CreateResume {
        CreateResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: applicant_id,
            resume_id: Uuid::new_v4(),
            title: "Backend Engineer".into(),
            about: "I like *queues*.".into(),
            desired_salary: None,
            location: LocationInput {
                country: "Germany".into(),
                city: "Berlin".into(),
                ..LocationInput::default()
            },
            contact: ContactInput {
                name: "Robin Seeker".into(),
                email: "robin@example.com".into(),
                phone: None,
            },
            employment_types: vec!["full_time".into()],
        }
    }

    fn job_input(position: &str) -> WorkExperienceInput {
        WorkExperienceInput {
            company: "Initech".into(),
            position: position.into(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: None,
            description: None,
        }
    }

    async fn seeded(database: &MemoryDatabase, clock: &FixedClock) -> Uuid {
        let directory = StubUserDirectory::new();
        let command = create_command(directory.add_applicant());
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();
        handle_create_resume(&command, clock, &directory, repo.as_ref())
            .await
            .unwrap();
        uow.commit().await.unwrap();
        command.resume_id
    }

    fn stored(database: &MemoryDatabase, resume_id: Uuid) -> Resume {
        database
            .table::<Resume>()
            .unwrap()
            .get(resume_id)
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_handle_create_resume_stages_draft() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();

        // Act
        let resume_id = seeded(&database, &clock).await;

        // Assert
        let resume = stored(&database, resume_id);
        assert_eq!(resume.status(), ResumeStatus::Draft);
        assert_eq!(resume.version(), 1);
    }

    #[tokio::test]
    async fn test_handle_create_resume_requires_applicant() {
        // Arrange
        let directory = StubUserDirectory::new();
        let command = create_command(directory.add_administrator());
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();

        // Act
        let err = handle_create_resume(&command, &FixedClock::default(), &directory, repo.as_ref())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.code(), "resume.applicant_required");
    }

    #[tokio::test]
    async fn test_handle_create_resume_with_taken_id_is_a_conflict() {
        // Arrange
        let clock = FixedClock::default();
        let directory = StubUserDirectory::new();
        let command = create_command(directory.add_applicant());
        let database = MemoryDatabase::new();
        let first = database.begin();
        let first_repo = first.repository::<Resume>().unwrap();
        handle_create_resume(&command, &clock, &directory, first_repo.as_ref())
            .await
            .unwrap();
        first.commit().await.unwrap();
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();

        // Act
        let err = handle_create_resume(&command, &clock, &directory, repo.as_ref())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "resume.already_exists");
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_create_returns_created_event() {
        let directory = StubUserDirectory::new();
        let command = create_command(directory.add_applicant());
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();

        let result =
            handle_create_resume(&command, &FixedClock::default(), &directory, repo.as_ref())
                .await
                .unwrap();

        assert_eq!(result.events[0].event_type(), RESUME_CREATED_EVENT_TYPE);
    }

    #[tokio::test]
    async fn test_draft_of_draft_resume_is_a_conflict() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let resume_id = seeded(&database, &clock).await;
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();
        let publish = PublishResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: Uuid::new_v4(),
            resume_id,
        };
        let draft = DraftResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: Uuid::new_v4(),
            resume_id,
        };

        // Act
        handle_publish_resume(&publish, &clock, repo.as_ref())
            .await
            .unwrap();
        let drafted = handle_draft_resume(&draft, &clock, repo.as_ref())
            .await
            .unwrap();
        let err = handle_draft_resume(&draft, &clock, repo.as_ref())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(drafted.events[0].event_type(), RESUME_DRAFTED_EVENT_TYPE);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), "resume.invalid_transition");
    }

    #[tokio::test]
    async fn test_child_entries_round_trip_through_handlers() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let resume_id = seeded(&database, &clock).await;
        let entry_id = Uuid::new_v4();
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();

        // Act
        let added = handle_add_work_experience(
            &AddWorkExperience {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
                entry_id,
                entry: job_input("Engineer"),
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap();
        handle_update_work_experience(
            &UpdateWorkExperience {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
                entry_id,
                entry: job_input("Senior Engineer"),
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap();
        handle_add_education(
            &AddEducation {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
                entry_id: Uuid::new_v4(),
                entry: EducationInput {
                    institution: "TU Berlin".into(),
                    degree: "MSc Computer Science".into(),
                    start: NaiveDate::from_ymd_opt(2014, 10, 1).unwrap(),
                    end: NaiveDate::from_ymd_opt(2016, 9, 30),
                },
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap();
        uow.commit().await.unwrap();

        // Assert
        assert_eq!(added.events[0].event_type(), RESUME_UPDATED_EVENT_TYPE);
        let resume = stored(&database, resume_id);
        assert_eq!(resume.work_experience()[0].position(), "Senior Engineer");
        assert_eq!(resume.education().len(), 1);
    }

    #[tokio::test]
    async fn test_removing_unknown_entry_is_not_found() {
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let resume_id = seeded(&database, &clock).await;
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();

        let err = handle_remove_education(
            &RemoveEducation {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
                entry_id: Uuid::new_v4(),
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_period_is_rejected_before_load() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();
        let mut entry = job_input("Engineer");
        entry.end = NaiveDate::from_ymd_opt(2019, 1, 1);

        // Act
        let err = handle_add_work_experience(
            &AddWorkExperience {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id: Uuid::new_v4(),
                entry_id: Uuid::new_v4(),
                entry,
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_handle_update_resume_emits_single_event() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let resume_id = seeded(&database, &clock).await;
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();
        let command = UpdateResume {
            correlation_id: Uuid::new_v4(),
            acting_user_id: Uuid::new_v4(),
            resume_id,
            title: Some("Staff Backend Engineer".into()),
            about: Some("Still like *queues*.".into()),
            add_employment_types: vec!["contract".into()],
            ..UpdateResume::default()
        };

        // Act
        let result = handle_update_resume(&command, &clock, repo.as_ref())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        // Assert
        assert_eq!(result.events.len(), 1);
        let resume = stored(&database, resume_id);
        assert_eq!(resume.content().title.as_str(), "Staff Backend Engineer");
        assert_eq!(
            resume.content().employment_types.codes(),
            vec!["full_time", "contract"]
        );
    }

    #[tokio::test]
    async fn test_handle_delete_resume_removes_published_resume() {
        // Arrange
        let clock = FixedClock::default();
        let database = MemoryDatabase::new();
        let resume_id = seeded(&database, &clock).await;
        let uow = database.begin();
        let repo = uow.repository::<Resume>().unwrap();
        handle_publish_resume(
            &PublishResume {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap();

        // Act
        let result = handle_delete_resume(
            &DeleteResume {
                correlation_id: Uuid::new_v4(),
                acting_user_id: Uuid::new_v4(),
                resume_id,
            },
            &clock,
            repo.as_ref(),
        )
        .await
        .unwrap();
        uow.commit().await.unwrap();

        // Assert
        assert_eq!(result.events[0].event_type(), RESUME_DELETED_EVENT_TYPE);
        assert!(database.table::<Resume>().unwrap().get(resume_id).unwrap().is_none());
    }
}
