//! Eligibility rules for applying to vacancies.

use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::clock::Clock;
use jobboard_core::directory::{Role, UserDirectory, require_user};
use jobboard_core::error::DomainError;
use jobboard_core::repository::AggregateReader;
use jobboard_core::value_objects::Description;
use jobboard_resume::domain::aggregates::Resume;
use jobboard_resume::domain::status::ResumeStatus;
use jobboard_vacancy::domain::aggregates::Vacancy;
use jobboard_vacancy::domain::status::VacancyStatus;
use uuid::Uuid;

use super::aggregates::{ApplicationParties, JobApplication};
use super::repository::ApplicationLookup;

/// Decides whether an applicant may apply, and creates the application.
pub struct ApplicationPolicy<'a> {
    directory: &'a dyn UserDirectory,
    vacancies: &'a dyn AggregateReader<Vacancy>,
    resumes: &'a dyn AggregateReader<Resume>,
    applications: &'a dyn ApplicationLookup,
}

impl<'a> ApplicationPolicy<'a> {
    #[must_use]
    pub fn new(
        directory: &'a dyn UserDirectory,
        vacancies: &'a dyn AggregateReader<Vacancy>,
        resumes: &'a dyn AggregateReader<Resume>,
        applications: &'a dyn ApplicationLookup,
    ) -> Self {
        Self {
            directory,
            vacancies,
            resumes,
            applications,
        }
    }

    /// Submits an application after checking every precondition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown user, vacancy
    /// or resume; `Problem` when the user is not an applicant
    /// (`application.applicant_required`), does not own the resume
    /// (`application.resume_not_owned`), the resume is not published
    /// (`application.resume_not_published`) or the vacancy is not published
    /// (`application.vacancy_not_published`); `Conflict`
    /// (`application.duplicate`) when the resume already has a submitted
    /// application to the vacancy.
    pub async fn submit(
        &self,
        application_id: Uuid,
        parties: ApplicationParties,
        cover_letter: Option<Description>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<JobApplication, DomainError> {
        let applicant = require_user(self.directory, parties.applicant_id).await?;
        if applicant.role != Role::Applicant {
            return Err(DomainError::problem(
                "application.applicant_required",
                format!("user {} is not an applicant", parties.applicant_id),
            ));
        }

        let resume = self
            .resumes
            .find_by_id(parties.resume_id)
            .await?
            .ok_or(DomainError::not_found(Resume::AGGREGATE_TYPE, parties.resume_id))?;
        if resume.owner_id() != parties.applicant_id {
            return Err(DomainError::problem(
                "application.resume_not_owned",
                format!(
                    "resume {} does not belong to user {}",
                    parties.resume_id, parties.applicant_id
                ),
            ));
        }
        if resume.status() != ResumeStatus::Published {
            return Err(DomainError::problem(
                "application.resume_not_published",
                format!("resume {} is not published", parties.resume_id),
            ));
        }

        let vacancy = self
            .vacancies
            .find_by_id(parties.vacancy_id)
            .await?
            .ok_or(DomainError::not_found(Vacancy::AGGREGATE_TYPE, parties.vacancy_id))?;
        if vacancy.status() != VacancyStatus::Published {
            return Err(DomainError::problem(
                "application.vacancy_not_published",
                format!("vacancy {} is not published", parties.vacancy_id),
            ));
        }

        let duplicate = self
            .applications
            .find_by_resume(parties.resume_id)
            .await?
            .into_iter()
            .any(|existing| existing.vacancy_id() == parties.vacancy_id && existing.is_active());
        if duplicate {
            return Err(DomainError::conflict(
                "application.duplicate",
                format!(
                    "resume {} already applied to vacancy {}",
                    parties.resume_id, parties.vacancy_id
                ),
            ));
        }

        Ok(JobApplication::submit(
            application_id,
            parties,
            cover_letter,
            correlation_id,
            clock,
        ))
    }
}
