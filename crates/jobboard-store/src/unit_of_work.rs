//! Unit of work with staged writes and optimistic concurrency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobboard_core::aggregate::AggregateRoot;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{
    AggregateReader, AggregateRepository, AggregateSearch, Predicate, UnitOfWork,
};
use tracing::debug;
use uuid::Uuid;

use crate::database::{AggregateTable, MemoryDatabase};
use crate::lock_poisoned;

enum Staged<A> {
    Insert(A),
    Update(A),
    Remove(A),
}

impl<A: AggregateRoot> Staged<A> {
    fn visible(&self) -> Option<&A> {
        match self {
            Self::Insert(aggregate) | Self::Update(aggregate) => Some(aggregate),
            Self::Remove(_) => None,
        }
    }
}

/// A repository whose staged writes take part in a unit of work commit.
trait Participant: Send + Sync {
    fn verify(&self) -> Result<(), DomainError>;
    fn apply(&self) -> Result<usize, DomainError>;
    fn discard(&self) -> Result<(), DomainError>;
}

/// Aggregate repository bound to one [`MemoryUnitOfWork`].
///
/// Reads see this unit of work's staged writes on top of committed state.
/// Staging the same aggregate twice keeps only the latest state.
pub struct MemoryAggregateRepository<A: AggregateRoot> {
    table: AggregateTable<A>,
    staged: Mutex<HashMap<Uuid, Staged<A>>>,
}

impl<A: AggregateRoot> std::fmt::Debug for MemoryAggregateRepository<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAggregateRepository")
            .field("aggregate_type", &A::AGGREGATE_TYPE)
            .finish_non_exhaustive()
    }
}

impl<A: AggregateRoot> MemoryAggregateRepository<A> {
    fn new(table: AggregateTable<A>) -> Self {
        Self {
            table,
            staged: Mutex::new(HashMap::new()),
        }
    }

    fn stage(
        &self,
        aggregate: &A,
        next: impl FnOnce(Option<Staged<A>>, A) -> Option<Staged<A>>,
    ) -> Result<(), DomainError> {
        let mut clean = aggregate.clone();
        clean.clear_uncommitted_events();
        let id = clean.aggregate_id();
        let mut staged = self.staged.lock().map_err(lock_poisoned)?;
        let previous = staged.remove(&id);
        if let Some(entry) = next(previous, clean) {
            staged.insert(id, entry);
        }
        Ok(())
    }
}

#[async_trait]
impl<A: AggregateRoot> AggregateReader<A> for MemoryAggregateRepository<A> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        if let Some(entry) = self.staged.lock().map_err(lock_poisoned)?.get(&id) {
            return Ok(entry.visible().cloned());
        }
        self.table.get(id)
    }
}

#[async_trait]
impl<A: AggregateRoot> AggregateSearch<A> for MemoryAggregateRepository<A> {
    async fn find_where(&self, filter: Predicate<'_, A>) -> Result<Vec<A>, DomainError> {
        let mut rows = self.table.snapshot()?;
        for (id, entry) in self.staged.lock().map_err(lock_poisoned)?.iter() {
            match entry.visible() {
                Some(aggregate) => {
                    rows.insert(*id, aggregate.clone());
                }
                None => {
                    rows.remove(id);
                }
            }
        }
        Ok(rows.into_values().filter(|aggregate| filter(aggregate)).collect())
    }
}

#[async_trait]
impl<A: AggregateRoot> AggregateRepository<A> for MemoryAggregateRepository<A> {
    async fn add(&self, aggregate: &A) -> Result<(), DomainError> {
        self.stage(aggregate, |_, clean| Some(Staged::Insert(clean)))
    }

    async fn mark_updated(&self, aggregate: &A) -> Result<(), DomainError> {
        self.stage(aggregate, |previous, clean| match previous {
            Some(Staged::Insert(_)) => Some(Staged::Insert(clean)),
            _ => Some(Staged::Update(clean)),
        })
    }

    async fn remove(&self, aggregate: &A) -> Result<(), DomainError> {
        self.stage(aggregate, |previous, clean| match previous {
            Some(Staged::Insert(_)) => None,
            _ => Some(Staged::Remove(clean)),
        })
    }
}

impl<A: AggregateRoot> Participant for MemoryAggregateRepository<A> {
    fn verify(&self) -> Result<(), DomainError> {
        for (id, entry) in self.staged.lock().map_err(lock_poisoned)?.iter() {
            let actual = self.table.version_of(*id)?;
            let expected = match entry {
                Staged::Insert(_) => 0,
                Staged::Update(aggregate) | Staged::Remove(aggregate) => aggregate.version(),
            };
            if actual != expected {
                return Err(DomainError::ConcurrencyConflict {
                    aggregate_id: *id,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn apply(&self) -> Result<usize, DomainError> {
        let staged: Vec<Staged<A>> = self
            .staged
            .lock()
            .map_err(lock_poisoned)?
            .drain()
            .map(|(_, entry)| entry)
            .collect();
        let written = staged.len();
        self.table.write(|rows| {
            for entry in staged {
                match entry {
                    Staged::Insert(mut aggregate) | Staged::Update(mut aggregate) => {
                        aggregate.set_version(aggregate.version() + 1);
                        rows.insert(aggregate.aggregate_id(), aggregate);
                    }
                    Staged::Remove(aggregate) => {
                        rows.remove(&aggregate.aggregate_id());
                    }
                }
            }
        })?;
        Ok(written)
    }

    fn discard(&self) -> Result<(), DomainError> {
        self.staged.lock().map_err(lock_poisoned)?.clear();
        Ok(())
    }
}

/// One command's atomic commit boundary over a [`MemoryDatabase`].
///
/// Repositories obtained from [`MemoryUnitOfWork::repository`] stage their
/// writes here. [`UnitOfWork::commit`] verifies every staged version under
/// the database commit lock and applies all writes or none.
pub struct MemoryUnitOfWork {
    database: MemoryDatabase,
    participants: Mutex<Vec<Arc<dyn Participant>>>,
}

impl std::fmt::Debug for MemoryUnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUnitOfWork")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl MemoryUnitOfWork {
    pub(crate) fn new(database: MemoryDatabase) -> Self {
        Self {
            database,
            participants: Mutex::new(Vec::new()),
        }
    }

    /// Returns a repository for aggregate type `A` bound to this unit of work.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the table cannot be resolved
    /// or a lock is poisoned.
    pub fn repository<A: AggregateRoot>(
        &self,
    ) -> Result<Arc<MemoryAggregateRepository<A>>, DomainError> {
        let repository = Arc::new(MemoryAggregateRepository::new(self.database.table::<A>()?));
        self.participants
            .lock()
            .map_err(lock_poisoned)?
            .push(Arc::clone(&repository) as Arc<dyn Participant>);
        Ok(repository)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(&self) -> Result<(), DomainError> {
        let participants = self.participants.lock().map_err(lock_poisoned)?.clone();
        let _guard = self.database.commit_lock().lock().await;

        let verified = participants.iter().try_for_each(|p| p.verify());
        if let Err(err) = verified {
            for participant in &participants {
                participant.discard()?;
            }
            debug!(error = %err, "commit rejected");
            return Err(err);
        }

        let mut written = 0;
        for participant in &participants {
            written += participant.apply()?;
        }
        debug!(written, "unit of work committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jobboard_core::event::{DomainEvent, EventMetadata};

    use super::*;

    #[derive(Debug, Clone)]
    struct Bumped {
        metadata: EventMetadata,
    }

    impl DomainEvent for Bumped {
        fn event_type(&self) -> &'static str {
            "counter.bumped"
        }

        fn metadata(&self) -> &EventMetadata {
            &self.metadata
        }
    }

    #[derive(Debug, Clone)]
    struct Counter {
        id: Uuid,
        value: u32,
        version: i64,
        uncommitted: Vec<Bumped>,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                id: Uuid::new_v4(),
                value: 0,
                version: 0,
                uncommitted: Vec::new(),
            }
        }

        fn bump(&mut self) {
            self.value += 1;
            self.uncommitted.push(Bumped {
                metadata: EventMetadata::caused_by_command(
                    "counter.bumped",
                    self.id,
                    Uuid::new_v4(),
                    Utc::now(),
                ),
            });
        }
    }

    impl AggregateRoot for Counter {
        type Event = Bumped;
        const AGGREGATE_TYPE: &'static str = "counter";

        fn aggregate_id(&self) -> Uuid {
            self.id
        }

        fn version(&self) -> i64 {
            self.version
        }

        fn set_version(&mut self, version: i64) {
            self.version = version;
        }

        fn uncommitted_events(&self) -> &[Bumped] {
            &self.uncommitted
        }

        fn clear_uncommitted_events(&mut self) {
            self.uncommitted.clear();
        }
    }

    async fn seed(database: &MemoryDatabase) -> Counter {
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();
        let counter = Counter::new();
        repo.add(&counter).await.unwrap();
        uow.commit().await.unwrap();
        database.table::<Counter>().unwrap().get(counter.id).unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_commit_assigns_versions_and_strips_events() {
        // Arrange
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();
        let mut counter = Counter::new();
        counter.bump();

        // Act
        repo.add(&counter).await.unwrap();
        uow.commit().await.unwrap();

        // Assert
        let stored = database.table::<Counter>().unwrap().get(counter.id).unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.value, 1);
        assert!(stored.uncommitted.is_empty());
    }

    #[tokio::test]
    async fn test_staged_writes_are_invisible_until_commit() {
        // Arrange
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();
        let counter = Counter::new();

        // Act
        repo.add(&counter).await.unwrap();

        // Assert
        let table = database.table::<Counter>().unwrap();
        assert!(table.find_by_id(counter.id).await.unwrap().is_none());
        assert!(repo.find_by_id(counter.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected_and_nothing_applies() {
        // Arrange
        let database = MemoryDatabase::new();
        let loaded = seed(&database).await;

        let winner = database.begin();
        let mut first = loaded.clone();
        first.bump();
        winner.repository::<Counter>().unwrap().mark_updated(&first).await.unwrap();
        winner.commit().await.unwrap();

        let loser = database.begin();
        let repo = loser.repository::<Counter>().unwrap();
        let mut second = loaded.clone();
        second.bump();
        second.bump();
        let bystander = Counter::new();
        repo.mark_updated(&second).await.unwrap();
        repo.add(&bystander).await.unwrap();

        // Act
        let result = loser.commit().await;

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::ConcurrencyConflict { expected: 1, actual: 2, .. })
        ));
        let table = database.table::<Counter>().unwrap();
        assert_eq!(table.get(loaded.id).unwrap().unwrap().value, 1);
        assert!(table.get(bystander.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_then_remove_in_one_unit_of_work_writes_nothing() {
        let database = MemoryDatabase::new();
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();
        let counter = Counter::new();

        repo.add(&counter).await.unwrap();
        repo.remove(&counter).await.unwrap();
        uow.commit().await.unwrap();

        assert!(database.table::<Counter>().unwrap().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_remove_deletes_committed_aggregate() {
        // Arrange
        let database = MemoryDatabase::new();
        let loaded = seed(&database).await;
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();

        // Act
        repo.remove(&loaded).await.unwrap();
        let staged_view = repo.find_by_id(loaded.id).await.unwrap();
        uow.commit().await.unwrap();

        // Assert
        assert!(staged_view.is_none());
        assert!(database.table::<Counter>().unwrap().get(loaded.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_where_overlays_staged_writes() {
        // Arrange
        let database = MemoryDatabase::new();
        let committed = seed(&database).await;
        let uow = database.begin();
        let repo = uow.repository::<Counter>().unwrap();
        let mut edited = committed.clone();
        edited.bump();
        let fresh = Counter::new();

        // Act
        repo.mark_updated(&edited).await.unwrap();
        repo.add(&fresh).await.unwrap();
        let bumped = repo.find_where(&|c: &Counter| c.value > 0).await.unwrap();
        let all = repo.find_where(&|_: &Counter| true).await.unwrap();

        // Assert
        assert_eq!(bumped.len(), 1);
        assert_eq!(bumped[0].id, committed.id);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts_with_existing_row() {
        let database = MemoryDatabase::new();
        let committed = seed(&database).await;
        let uow = database.begin();
        let mut clash = Counter::new();
        clash.id = committed.id;
        uow.repository::<Counter>().unwrap().add(&clash).await.unwrap();

        let result = uow.commit().await;

        assert!(matches!(
            result,
            Err(DomainError::ConcurrencyConflict { expected: 0, actual: 1, .. })
        ));
    }
}
