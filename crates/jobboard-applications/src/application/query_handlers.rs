//! Query handlers for the Applications context.

use jobboard_core::error::DomainError;
use jobboard_core::repository::ReadModelRepository;
use uuid::Uuid;

use super::read_models::{ApplicationView, VacancyApplicationSummary};

/// Retrieves one submitted application.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no view exists.
pub async fn get_application(
    application_id: Uuid,
    repo: &dyn ReadModelRepository<ApplicationView>,
) -> Result<ApplicationView, DomainError> {
    repo.find_by_key(&application_id)
        .await?
        .ok_or(DomainError::not_found("application_view", application_id))
}

/// Lists submitted applications to a vacancy, oldest first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_vacancy_applications(
    vacancy_id: Uuid,
    repo: &dyn ReadModelRepository<ApplicationView>,
) -> Result<Vec<ApplicationView>, DomainError> {
    let mut rows = repo
        .find_where(&|view: &ApplicationView| view.vacancy_id == vacancy_id)
        .await?;
    rows.sort_by_key(|view| (view.submitted_at, view.application_id));
    Ok(rows)
}

/// Lists an applicant's submitted applications, newest first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_applicant_applications(
    applicant_id: Uuid,
    repo: &dyn ReadModelRepository<ApplicationView>,
) -> Result<Vec<ApplicationView>, DomainError> {
    let mut rows = repo
        .find_where(&|view: &ApplicationView| view.applicant_id == applicant_id)
        .await?;
    rows.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then(a.application_id.cmp(&b.application_id))
    });
    Ok(rows)
}

/// Retrieves the application counts of a vacancy.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the vacancy has never
/// received an application.
pub async fn get_vacancy_application_summary(
    vacancy_id: Uuid,
    repo: &dyn ReadModelRepository<VacancyApplicationSummary>,
) -> Result<VacancyApplicationSummary, DomainError> {
    repo.find_by_key(&vacancy_id)
        .await?
        .ok_or(DomainError::not_found("vacancy_application_summary", vacancy_id))
}
