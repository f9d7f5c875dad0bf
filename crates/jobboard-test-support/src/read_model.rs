//! Read-model repository doubles.

use std::marker::PhantomData;

use async_trait::async_trait;
use jobboard_core::error::DomainError;
use jobboard_core::repository::{Predicate, ReadModel, ReadModelRepository};

/// A read-model repository whose every operation fails with an
/// infrastructure error. Useful for testing projector failure isolation.
#[derive(Debug)]
pub struct FailingReadModelRepository<R> {
    _row: PhantomData<fn() -> R>,
}

impl<R> Default for FailingReadModelRepository<R> {
    fn default() -> Self {
        Self { _row: PhantomData }
    }
}

fn unavailable() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl<R: ReadModel> ReadModelRepository<R> for FailingReadModelRepository<R> {
    async fn find_by_key(&self, _key: &R::Key) -> Result<Option<R>, DomainError> {
        Err(unavailable())
    }

    async fn upsert(&self, _row: R) -> Result<(), DomainError> {
        Err(unavailable())
    }

    async fn remove(&self, _key: &R::Key) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn remove_where(&self, _filter: Predicate<'_, R>) -> Result<usize, DomainError> {
        Err(unavailable())
    }

    async fn find_where(&self, _filter: Predicate<'_, R>) -> Result<Vec<R>, DomainError> {
        Err(unavailable())
    }
}
