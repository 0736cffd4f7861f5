//! Store error types.

use derive_more::{Display, Error};

/// Error from the shared game store.
///
/// Write failures surface here and stop the transition: the engine treats
/// the staged state as unconfirmed and does not retry or roll back on its
/// own — reconciliation belongs to the caller watching the document.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StoreError {
    /// No document with the given id.
    #[display("game '{id}' not found")]
    NotFound {
        /// The missing document id.
        id: String,
    },
    /// A document with the given id already exists.
    #[display("game '{id}' already exists")]
    AlreadyExists {
        /// The colliding document id.
        id: String,
    },
    /// A guarded write lost the race for the turn slot.
    #[display("turn changed before the write landed in game '{id}'")]
    TurnConflict {
        /// The contested document id.
        id: String,
    },
    /// The referenced seat does not exist.
    #[display("seat '{seat_id}' not found in game '{id}'")]
    SeatNotFound {
        /// The game id.
        id: String,
        /// The missing seat id.
        seat_id: String,
    },
    /// The backend rejected the operation.
    #[display("store backend error: {message}")]
    Backend {
        /// Backend-supplied description.
        message: String,
    },
}

impl StoreError {
    /// Creates a [`StoreError::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a [`StoreError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
