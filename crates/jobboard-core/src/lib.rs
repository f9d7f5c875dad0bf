//! Job Board Core: shared domain abstractions.
//!
//! This crate defines the traits and types every bounded context depends
//! on: aggregates, lifecycle state machines, domain events and handlers,
//! persistence collaborators, and the value objects shared across
//! contexts. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod directory;
pub mod error;
pub mod event;
pub mod handler;
pub mod render;
pub mod repository;
pub mod status;
pub mod value_objects;
