//! Domain services for the Vacancy context.

use jobboard_core::clock::Clock;
use jobboard_core::directory::{Role, UserDirectory, require_user};
use jobboard_core::error::DomainError;
use uuid::Uuid;

use super::aggregates::{Vacancy, VacancyContent};

/// Creates vacancies after checking who is creating them.
pub struct VacancyFactory<'a> {
    directory: &'a dyn UserDirectory,
}

impl<'a> VacancyFactory<'a> {
    /// Creates a factory backed by `directory`.
    #[must_use]
    pub fn new(directory: &'a dyn UserDirectory) -> Self {
        Self { directory }
    }

    /// Creates a draft vacancy for the employer's company.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown user, and
    /// `DomainError::Problem` when the user is not an employer
    /// (`vacancy.employer_required`) or represents no company
    /// (`vacancy.company_required`).
    pub async fn create(
        &self,
        vacancy_id: Uuid,
        employer_id: Uuid,
        content: VacancyContent,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Vacancy, DomainError> {
        let employer = require_user(self.directory, employer_id).await?;
        if employer.role != Role::Employer {
            return Err(DomainError::problem(
                "vacancy.employer_required",
                format!("user {employer_id} is not an employer"),
            ));
        }
        let company_id = employer.company_id.ok_or_else(|| {
            DomainError::problem(
                "vacancy.company_required",
                format!("employer {employer_id} does not represent a company"),
            )
        })?;
        Ok(Vacancy::create(
            vacancy_id,
            company_id,
            employer_id,
            content,
            correlation_id,
            clock,
        ))
    }
}
