//! In-memory user directory stub.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use jobboard_core::directory::{Role, UserDirectory, UserProfile};
use jobboard_core::error::DomainError;
use uuid::Uuid;

/// A user directory backed by a map. Unknown ids resolve to `None`.
#[derive(Debug, Default)]
pub struct StubUserDirectory {
    users: Mutex<HashMap<Uuid, UserProfile>>,
}

impl StubUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an employer representing `company_id` and returns their id.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_employer(&self, company_id: Uuid) -> Uuid {
        self.insert(Role::Employer, Some(company_id))
    }

    /// Registers an applicant and returns their id.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_applicant(&self) -> Uuid {
        self.insert(Role::Applicant, None)
    }

    /// Registers an administrator and returns their id.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_administrator(&self) -> Uuid {
        self.insert(Role::Administrator, None)
    }

    fn insert(&self, role: Role, company_id: Option<Uuid>) -> Uuid {
        let user_id = Uuid::new_v4();
        self.users.lock().unwrap().insert(
            user_id,
            UserProfile {
                user_id,
                role,
                company_id,
            },
        );
        user_id
    }
}

#[async_trait]
impl UserDirectory for StubUserDirectory {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}
