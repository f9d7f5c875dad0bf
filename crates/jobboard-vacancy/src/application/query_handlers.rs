//! Query handlers for the Vacancy context.
//!
//! Queries read projected rows only; they never touch the write model.

use jobboard_core::error::DomainError;
use jobboard_core::repository::ReadModelRepository;
use uuid::Uuid;

use super::read_models::{CompanyVacancy, VacancyListing};

/// Retrieves the public listing of a published vacancy.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no listing exists.
pub async fn get_vacancy_listing(
    vacancy_id: Uuid,
    repo: &dyn ReadModelRepository<VacancyListing>,
) -> Result<VacancyListing, DomainError> {
    repo.find_by_key(&vacancy_id)
        .await?
        .ok_or(DomainError::not_found("vacancy_listing", vacancy_id))
}

/// Lists published vacancies, most recently published first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_vacancy_listings(
    repo: &dyn ReadModelRepository<VacancyListing>,
) -> Result<Vec<VacancyListing>, DomainError> {
    let mut rows = repo.all().await?;
    rows.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then(a.vacancy_id.cmp(&b.vacancy_id))
    });
    Ok(rows)
}

/// Lists a company's vacancies in any status, oldest first.
///
/// # Errors
///
/// Returns repository errors.
pub async fn list_company_vacancies(
    company_id: Uuid,
    repo: &dyn ReadModelRepository<CompanyVacancy>,
) -> Result<Vec<CompanyVacancy>, DomainError> {
    let mut rows = repo
        .find_where(&|row: &CompanyVacancy| row.company_id == company_id)
        .await?;
    rows.sort_by_key(|row| (row.created_at, row.vacancy_id));
    Ok(rows)
}
