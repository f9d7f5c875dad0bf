//! Relationship lookups over job applications.

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{AggregateRepository, AggregateSearch};
use uuid::Uuid;

use super::aggregates::JobApplication;

/// Finds applications by the vacancy or resume they reference.
#[async_trait]
pub trait ApplicationLookup: AggregateSearch<JobApplication> {
    /// Every application, in any status, made to `vacancy_id`.
    async fn find_by_vacancy(&self, vacancy_id: Uuid) -> Result<Vec<JobApplication>, DomainError> {
        self.find_where(&|application: &JobApplication| application.vacancy_id() == vacancy_id)
            .await
    }

    /// Every application, in any status, made with `resume_id`.
    async fn find_by_resume(&self, resume_id: Uuid) -> Result<Vec<JobApplication>, DomainError> {
        self.find_where(&|application: &JobApplication| application.resume_id() == resume_id)
            .await
    }
}

impl<T: AggregateSearch<JobApplication>> ApplicationLookup for T {}

/// Write access with lookups, as needed by the submit handler.
pub trait JobApplicationRepository:
    AggregateRepository<JobApplication> + ApplicationLookup
{
}

impl<T> JobApplicationRepository for T where
    T: AggregateRepository<JobApplication> + AggregateSearch<JobApplication>
{
}
