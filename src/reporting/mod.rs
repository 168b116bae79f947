//! Error reporting subsystem.
//!
//! # Responsibilities
//! - Define the contract the error normalization middleware reports through
//! - Provide a default handler backed by structured logging
//!
//! # Design Decisions
//! - Handlers are async and shared behind `Arc`, set once at startup
//! - Failures are returned to the caller, never swallowed here
//! - An empty [`ErrorId`](crate::envelope::ErrorId) means "not recorded"

pub mod handler;
pub mod tracing_handler;

pub use handler::ErrorHandler;
pub use tracing_handler::TracingErrorHandler;
