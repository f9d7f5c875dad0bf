//! Application layer for the Resume context.

pub mod command_handlers;
pub mod projectors;
pub mod query_handlers;
pub mod read_models;
