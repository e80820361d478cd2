use thiserror::Error;

use crate::workflow::state::Stage;

/// Coordinator-level error type.
/// `Display` is the short message shown to the user, so variants carry the final text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Rejected locally before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// The backend call for `stage` failed. The workflow has already reverted.
    #[error("{message}")]
    Transport { stage: Stage, message: String },

    /// A later stage was entered without the data an earlier stage produces.
    #[error("{0}")]
    MissingPrecondition(String),
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        WorkflowError::Validation(message.into())
    }

    pub fn missing(message: impl Into<String>) -> Self {
        WorkflowError::MissingPrecondition(message.into())
    }
}
