//! Application layer for the Applications context.

pub mod command_handlers;
pub mod projectors;
pub mod query_handlers;
pub mod read_models;
