//! Domain layer for the Resume context.

pub mod aggregates;
pub mod commands;
pub mod entities;
pub mod events;
pub mod services;
pub mod status;
