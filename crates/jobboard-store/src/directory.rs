//! In-memory user directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use jobboard_core::directory::{UserDirectory, UserProfile};
use jobboard_core::error::DomainError;
use uuid::Uuid;

/// User accounts held in memory. Cloning shares the same accounts.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<DashMap<Uuid, UserProfile>>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    pub fn register(&self, profile: UserProfile) {
        self.users.insert(profile.user_id, profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.users.get(&user_id).map(|entry| entry.value().clone()))
    }
}
