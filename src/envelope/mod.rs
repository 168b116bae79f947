//! Error payload types.
//!
//! # Data Flow
//! ```text
//! handler returns (StatusCode, HttpError)
//!     → http_error.rs (typed payload stored in response extensions)
//!     → [error normalization middleware]
//!     → error_id.rs (correlation id from the error handler)
//!     → response.rs (ApiErrorResponse envelope sent to the client)
//! ```
//!
//! # Design Decisions
//! - The typed payload travels in the response extensions so it can be
//!   detected without reparsing the body
//! - The nil UUID stands for "no id assigned"
//! - The envelope omits `errorId` instead of sending an empty string

pub mod error_id;
pub mod http_error;
pub mod response;

pub use error_id::ErrorId;
pub use http_error::HttpError;
pub use response::ApiErrorResponse;
