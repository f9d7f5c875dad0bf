//! Job Board Eventing: post-commit domain event dispatch.
//!
//! A [`HandlerRegistry`] is built once at process start from an explicit
//! list of handlers and handed to an [`EventDispatcher`]. The dispatcher
//! routes every committed event to the handlers subscribed to its type, in
//! registration order, and records failures instead of propagating them.

mod dispatcher;
mod registry;

pub use dispatcher::{DispatchHandle, DispatchReport, EventDispatcher, HandlerFailure};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
