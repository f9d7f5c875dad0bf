//! Persistence collaborator traits.
//!
//! The core only calls these traits; storage technology lives elsewhere.
//! Aggregate writes are staged against a unit of work and become visible
//! only after [`UnitOfWork::commit`] succeeds.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;

/// Read access to committed aggregates.
#[async_trait]
pub trait AggregateReader<A: AggregateRoot>: Send + Sync {
    /// Loads the committed state of an aggregate, if it exists.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<A>, DomainError>;
}

/// Predicate over aggregates or rows, used for lookups and fan-out removal.
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Relationship lookups over committed aggregates.
#[async_trait]
pub trait AggregateSearch<A: AggregateRoot>: AggregateReader<A> {
    /// Returns every aggregate matching `filter`.
    async fn find_where(&self, filter: Predicate<'_, A>) -> Result<Vec<A>, DomainError>;
}

/// Write access to aggregates, bound to one unit of work.
#[async_trait]
pub trait AggregateRepository<A: AggregateRoot>: AggregateReader<A> {
    /// Stages insertion of a new aggregate.
    async fn add(&self, aggregate: &A) -> Result<(), DomainError>;

    /// Stages an update of a loaded aggregate.
    async fn mark_updated(&self, aggregate: &A) -> Result<(), DomainError>;

    /// Stages removal of a loaded aggregate.
    async fn remove(&self, aggregate: &A) -> Result<(), DomainError>;
}

/// Atomic commit boundary for one command's writes.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Applies every staged write atomically.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConcurrencyConflict` when a staged aggregate was
    /// written by someone else since it was loaded; nothing is applied then.
    async fn commit(&self) -> Result<(), DomainError>;
}

/// A denormalized, query-optimized row.
pub trait ReadModel: Clone + Debug + Send + Sync + 'static {
    /// Key the row is stored under.
    type Key: Clone + Debug + Eq + Hash + Send + Sync + 'static;

    /// Returns the key of this row.
    fn key(&self) -> Self::Key;
}

/// Storage for one kind of read-model row.
///
/// Every write is a single atomic operation and is the projector's commit.
#[async_trait]
pub trait ReadModelRepository<R: ReadModel>: Send + Sync {
    /// Looks up a row by key.
    async fn find_by_key(&self, key: &R::Key) -> Result<Option<R>, DomainError>;

    /// Inserts or fully replaces the row stored under `row.key()`.
    async fn upsert(&self, row: R) -> Result<(), DomainError>;

    /// Removes the row stored under `key`. Returns whether a row existed.
    async fn remove(&self, key: &R::Key) -> Result<bool, DomainError>;

    /// Removes every row matching `filter`. Returns how many were removed.
    async fn remove_where(&self, filter: Predicate<'_, R>) -> Result<usize, DomainError>;

    /// Returns every row matching `filter`.
    async fn find_where(&self, filter: Predicate<'_, R>) -> Result<Vec<R>, DomainError>;

    /// Returns every row.
    async fn all(&self) -> Result<Vec<R>, DomainError> {
        self.find_where(&|_: &R| true).await
    }
}
