//! Aggregate tables and the database that owns them.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dashmap::DashMap;
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{AggregateReader, AggregateSearch, Predicate};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::lock_poisoned;
use crate::unit_of_work::MemoryUnitOfWork;

/// Committed rows of one aggregate type, keyed by aggregate id.
pub struct AggregateTable<A: AggregateRoot> {
    rows: Arc<RwLock<HashMap<Uuid, A>>>,
}

impl<A: AggregateRoot> Clone for AggregateTable<A> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<A: AggregateRoot> Default for AggregateTable<A> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<A: AggregateRoot> std::fmt::Debug for AggregateTable<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateTable")
            .field("aggregate_type", &A::AGGREGATE_TYPE)
            .finish_non_exhaustive()
    }
}

impl<A: AggregateRoot> AggregateTable<A> {
    /// Returns the committed aggregate, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn get(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        Ok(self.rows.read().map_err(lock_poisoned)?.get(&id).cloned())
    }

    /// Returns the committed version of an aggregate, `0` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn version_of(&self, id: Uuid) -> Result<i64, DomainError> {
        Ok(self
            .rows
            .read()
            .map_err(lock_poisoned)?
            .get(&id)
            .map_or(0, AggregateRoot::version))
    }

    /// Number of committed aggregates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.rows.read().map_err(lock_poisoned)?.len())
    }

    /// Whether the table holds no committed aggregates.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    pub(crate) fn snapshot(&self) -> Result<HashMap<Uuid, A>, DomainError> {
        Ok(self.rows.read().map_err(lock_poisoned)?.clone())
    }

    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, A>) -> T,
    ) -> Result<T, DomainError> {
        let mut rows = self.rows.write().map_err(lock_poisoned)?;
        Ok(f(&mut rows))
    }
}

#[async_trait]
impl<A: AggregateRoot> AggregateReader<A> for AggregateTable<A> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        self.get(id)
    }
}

#[async_trait]
impl<A: AggregateRoot> AggregateSearch<A> for AggregateTable<A> {
    async fn find_where(&self, filter: Predicate<'_, A>) -> Result<Vec<A>, DomainError> {
        Ok(self
            .rows
            .read()
            .map_err(lock_poisoned)?
            .values()
            .filter(|aggregate| filter(aggregate))
            .cloned()
            .collect())
    }
}

/// In-memory write-model database.
///
/// Holds one [`AggregateTable`] per aggregate type and the lock that
/// serializes commits. Cloning shares the same storage.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<DashMap<TypeId, Box<dyn Any + Send + Sync>>>,
    commit_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for MemoryDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDatabase")
            .field("tables", &self.tables.len())
            .finish_non_exhaustive()
    }
}

impl MemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for aggregate type `A`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the slot registered for `A`
    /// holds a different table type.
    pub fn table<A: AggregateRoot>(&self) -> Result<AggregateTable<A>, DomainError> {
        let slot = self
            .tables
            .entry(TypeId::of::<A>())
            .or_insert_with(|| Box::new(AggregateTable::<A>::default()));
        slot.downcast_ref::<AggregateTable<A>>()
            .cloned()
            .ok_or_else(|| {
                DomainError::Infrastructure(format!(
                    "table for {} has an unexpected type",
                    A::AGGREGATE_TYPE
                ))
            })
    }

    /// Starts a unit of work against this database.
    #[must_use]
    pub fn begin(&self) -> MemoryUnitOfWork {
        MemoryUnitOfWork::new(self.clone())
    }

    pub(crate) fn commit_lock(&self) -> &Mutex<()> {
        &self.commit_lock
    }
}
