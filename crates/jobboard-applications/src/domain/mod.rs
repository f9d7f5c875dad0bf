//! Domain layer for the Applications context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod repository;
pub mod services;
pub mod status;
