//! User directory collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Role a user acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Publishes vacancies on behalf of a company.
    Employer,
    /// Maintains resumes and applies to vacancies.
    Applicant,
    /// Operates the job board.
    Administrator,
}

/// The parts of a user account the domain services need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User identifier.
    pub user_id: Uuid,
    /// The user's role.
    pub role: Role,
    /// Company the user represents, for employers.
    pub company_id: Option<Uuid>,
}

/// Lookup of user accounts, provided by the identity collaborator.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id.
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError>;
}

/// Loads a user and fails with `AggregateNotFound` when absent.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the user does not exist, or
/// whatever the directory returns.
pub async fn require_user(
    directory: &dyn UserDirectory,
    user_id: Uuid,
) -> Result<UserProfile, DomainError> {
    directory
        .find_user(user_id)
        .await?
        .ok_or(DomainError::not_found("user", user_id))
}
