//! View engine error types

/// Errors raised by the view engine itself.
///
/// Every other failure a caller can see comes from a collaborator and is
/// reported as a [`StoreError`](super::StoreError).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A column reorder referenced a position outside the current order.
    #[error("Invalid column index: cannot move {from} to {to} in {len} columns")]
    InvalidIndex {
        /// Position the column was taken from.
        from: usize,
        /// Position the column was to be inserted at.
        to: usize,
        /// Number of columns in the current order.
        len: usize,
    },
}

impl ViewError {
    /// Creates a new invalid index error.
    pub fn invalid_index(from: usize, to: usize, len: usize) -> Self {
        Self::InvalidIndex { from, to, len }
    }
}
