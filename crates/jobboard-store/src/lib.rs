//! In-memory persistence for the job board.
//!
//! Aggregates live in per-type tables inside a [`MemoryDatabase`]. Writes
//! are staged on a [`MemoryUnitOfWork`] and applied atomically on commit,
//! with optimistic concurrency on the aggregate version. Read models live in
//! [`MemoryReadModelStore`]s, where every write is applied immediately.
//! User accounts live in a [`MemoryUserDirectory`].

mod database;
mod directory;
mod read_models;
mod unit_of_work;

use std::sync::PoisonError;

use jobboard_core::error::DomainError;

pub use database::{AggregateTable, MemoryDatabase};
pub use directory::MemoryUserDirectory;
pub use read_models::MemoryReadModelStore;
pub use unit_of_work::{MemoryAggregateRepository, MemoryUnitOfWork};

fn lock_poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Infrastructure("storage lock poisoned".into())
}
