//! Collaborator error types

use std::time::Duration;

/// Errors reported by row sources, row updaters and file stores.
///
/// The view engine never produces these; it passes them through to the
/// caller unmodified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No caller identity, or the caller does not own the resource.
    #[error("Not authorized")]
    NotAuthorized,

    /// The referenced file or row does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What was looked up ("file" or "row").
        kind: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// An upload contained no records.
    #[error("Uploaded file contains no rows")]
    EmptyFile,

    /// An upload declared no columns.
    #[error("Uploaded file declares no columns")]
    NoColumns,

    /// The backend could not be reached or failed transiently.
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    /// The operation did not complete in time.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Creates a not-found error for a file.
    pub fn file_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: "file",
            id: id.to_string(),
        }
    }

    /// Creates a not-found error for a row.
    pub fn row_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind: "row",
            id: id.to_string(),
        }
    }

    /// Creates a transient backend error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` if retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout(_))
    }
}
