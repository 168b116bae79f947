//! HTTP middleware.
//!
//! # Data Flow
//! ```text
//! request
//!     → layer.rs (capture RequestContext, call inner service)
//!     → normalizer.rs (override, or: skip 500 → extract HttpError → report → envelope)
//!     → response
//! ```

pub mod layer;
pub mod normalizer;

pub use layer::{ErrorNormalization, ErrorNormalizationLayer};
pub use normalizer::{
    BuildError, Outcome, ResponseNormalizer, ResponseNormalizerBuilder, ResponseOverride,
};
