//! Common result and error types for internal invariants.

/// The standard result type for operations that can only fail on a bug.
///
/// User-facing input problems are reported as [`FabricError`](crate::FabricError);
/// `Err` here means an internal invariant of the generator was broken.
pub type FabResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in fabgen, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
