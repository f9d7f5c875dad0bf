//! Job board composition root.
//!
//! Wires the bounded contexts to the in-memory store and the event
//! dispatchers, and runs commands through [`JobBoard`]: one unit of work per
//! attempt, retry on concurrency conflicts, then post-commit dispatch.

pub mod config;
pub mod error;
pub mod markdown;
pub mod service;
pub mod telemetry;
pub mod wiring;

pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use markdown::MarkdownRenderer;
pub use service::{CommandReceipt, JobBoard};
pub use wiring::{Dispatchers, ReadModels};
