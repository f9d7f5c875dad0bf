//! Domain layer for the Vacancy context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod services;
pub mod status;
