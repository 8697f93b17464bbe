//! Error types for photo triage

use crate::domain::PhotoId;
use thiserror::Error;

/// Everything that can go wrong during a triage session.
///
/// The type is `Clone` so the engine can keep the failure that put it into
/// its `Error` state and hand copies to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// The batch provider returned an empty batch
    #[error("No photos found")]
    NoItems,

    /// Access to the photo library was refused
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The photo library could not be read
    #[error("Photo library unavailable: {0}")]
    Unavailable(String),

    /// A deletion request completed with an error. Reported out of band,
    /// never changes the session counts.
    #[error("Failed to delete {name}: {reason}")]
    DeletionFailed {
        photo_id: PhotoId,
        name: String,
        reason: String,
    },

    /// An operation was called in a state that does not allow it
    #[error("Cannot {operation} while {state}")]
    InvalidOperation {
        operation: &'static str,
        state: &'static str,
    },

    /// `undo_last_delete` was called with no pending delete
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The user configuration could not be read or written
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TriageError {
    /// Whether this error should put the engine into its `Error` state.
    /// Deletion failures and invalid operations are reported but non-fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TriageError::NoItems | TriageError::PermissionDenied(_) | TriageError::Unavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
