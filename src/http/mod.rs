//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, request ID, limits)
//!     → middleware/ (error normalization)
//!     → routes.rs (handlers returning HttpError on failure)
//!     → [normalized envelope or untouched response]
//!     → Send to client
//! ```

pub mod context;
pub mod middleware;
pub mod request;
pub mod routes;
pub mod server;

pub use context::RequestContext;
pub use middleware::{ErrorNormalization, ErrorNormalizationLayer, ResponseNormalizer};
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
