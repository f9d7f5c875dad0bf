//! Shared test doubles and fixtures for the job board.

mod clock;
mod directory;
mod handler;
mod read_model;
mod render;

pub use clock::{FixedClock, fixed_time};
pub use directory::StubUserDirectory;
pub use handler::{CallJournal, FailingHandler, RecordingHandler};
pub use read_model::FailingReadModelRepository;
pub use render::PassthroughRenderer;
