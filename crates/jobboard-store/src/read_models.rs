//! In-memory read-model storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{Predicate, ReadModel, ReadModelRepository};

use crate::lock_poisoned;

/// Rows of one read model, keyed by [`ReadModel::key`].
///
/// Each operation takes the table lock once, so every write is atomic on
/// its own. Cloning shares the same rows.
pub struct MemoryReadModelStore<R: ReadModel> {
    rows: Arc<RwLock<HashMap<R::Key, R>>>,
}

impl<R: ReadModel> Clone for MemoryReadModelStore<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R: ReadModel> Default for MemoryReadModelStore<R> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R: ReadModel> std::fmt::Debug for MemoryReadModelStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.rows.read().map(|rows| rows.len()).unwrap_or_default();
        f.debug_struct("MemoryReadModelStore")
            .field("rows", &rows)
            .finish()
    }
}

impl<R: ReadModel> MemoryReadModelStore<R> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<R: ReadModel> ReadModelRepository<R> for MemoryReadModelStore<R> {
    async fn find_by_key(&self, key: &R::Key) -> Result<Option<R>, DomainError> {
        Ok(self.rows.read().map_err(lock_poisoned)?.get(key).cloned())
    }

    async fn upsert(&self, row: R) -> Result<(), DomainError> {
        self.rows
            .write()
            .map_err(lock_poisoned)?
            .insert(row.key(), row);
        Ok(())
    }

    async fn remove(&self, key: &R::Key) -> Result<bool, DomainError> {
        Ok(self
            .rows
            .write()
            .map_err(lock_poisoned)?
            .remove(key)
            .is_some())
    }

    async fn remove_where(&self, filter: Predicate<'_, R>) -> Result<usize, DomainError> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        let before = rows.len();
        rows.retain(|_, row| !filter(row));
        Ok(before - rows.len())
    }

    async fn find_where(&self, filter: Predicate<'_, R>) -> Result<Vec<R>, DomainError> {
        Ok(self
            .rows
            .read()
            .map_err(lock_poisoned)?
            .values()
            .filter(|row| filter(row))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Membership {
        team_id: Uuid,
        member_id: Uuid,
        nickname: String,
    }

    impl ReadModel for Membership {
        type Key = (Uuid, Uuid);

        fn key(&self) -> Self::Key {
            (self.team_id, self.member_id)
        }
    }

    fn membership(team_id: Uuid, nickname: &str) -> Membership {
        Membership {
            team_id,
            member_id: Uuid::new_v4(),
            nickname: nickname.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_row_under_same_key() {
        // Arrange
        let store = MemoryReadModelStore::new();
        let mut row = membership(Uuid::new_v4(), "ada");
        store.upsert(row.clone()).await.unwrap();

        // Act
        row.nickname = "grace".to_owned();
        store.upsert(row.clone()).await.unwrap();
        store.upsert(row.clone()).await.unwrap();

        // Assert
        assert_eq!(store.all().await.unwrap(), vec![row.clone()]);
        assert_eq!(store.find_by_key(&row.key()).await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn test_remove_reports_whether_row_existed() {
        let store = MemoryReadModelStore::new();
        let row = membership(Uuid::new_v4(), "ada");
        store.upsert(row.clone()).await.unwrap();

        assert!(store.remove(&row.key()).await.unwrap());
        assert!(!store.remove(&row.key()).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_where_fans_out_over_matching_rows() {
        // Arrange
        let store = MemoryReadModelStore::new();
        let team = Uuid::new_v4();
        let other = membership(Uuid::new_v4(), "linus");
        for name in ["ada", "grace", "barbara"] {
            store.upsert(membership(team, name)).await.unwrap();
        }
        store.upsert(other.clone()).await.unwrap();

        // Act
        let removed = store
            .remove_where(&|row: &Membership| row.team_id == team)
            .await
            .unwrap();

        // Assert
        assert_eq!(removed, 3);
        assert_eq!(store.all().await.unwrap(), vec![other]);
    }
}
