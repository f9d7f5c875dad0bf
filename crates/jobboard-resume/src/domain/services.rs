//! Domain services for the Resume context.

use jobboard_core::clock::Clock;
use jobboard_core::directory::{Role, UserDirectory, require_user};
use jobboard_core::error::DomainError;
use uuid::Uuid;

use super::aggregates::{Resume, ResumeContent};

/// Creates resumes on behalf of applicants.
pub struct ResumeFactory<'a> {
    directory: &'a dyn UserDirectory,
}

impl<'a> ResumeFactory<'a> {
    #[must_use]
    pub fn new(directory: &'a dyn UserDirectory) -> Self {
        Self { directory }
    }

    /// Creates a draft resume owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` for an unknown user and
    /// `DomainError::Problem` (`resume.applicant_required`) for anyone who is
    /// not an applicant.
    pub async fn create(
        &self,
        resume_id: Uuid,
        owner_id: Uuid,
        content: ResumeContent,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Resume, DomainError> {
        let owner = require_user(self.directory, owner_id).await?;
        if owner.role != Role::Applicant {
            return Err(DomainError::problem(
                "resume.applicant_required",
                format!("user {owner_id} is not an applicant"),
            ));
        }
        Ok(Resume::create(
            resume_id,
            owner_id,
            content,
            correlation_id,
            clock,
        ))
    }
}
