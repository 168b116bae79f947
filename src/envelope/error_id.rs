//! Error correlation identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier handed out by an [`ErrorHandler`](crate::reporting::ErrorHandler)
/// so a reported error can be found again in logs or support tooling.
///
/// The nil UUID means the handler did not record the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(Uuid);

impl ErrorId {
    /// No id was assigned.
    pub const EMPTY: ErrorId = ErrorId(Uuid::nil());

    /// Generate a fresh random (v4) id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// String form for the envelope, `None` when empty.
    pub fn to_envelope_field(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.to_string())
        }
    }
}

impl From<Uuid> for ErrorId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Option<Uuid>> for ErrorId {
    fn from(uuid: Option<Uuid>) -> Self {
        uuid.map(Self).unwrap_or(Self::EMPTY)
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
