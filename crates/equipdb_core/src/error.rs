//! Error types for EquipDB core.

use crate::types::RecordId;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in record store operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record with the given id exists.
    #[error("record not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    /// The backing file exists but could not be parsed.
    #[error("failed to load {location}: {source}")]
    Load {
        /// Where the snapshot was read from.
        location: String,
        /// What was wrong with it.
        #[source]
        source: SnapshotError,
    },

    /// Reading or writing the backing storage failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] equipdb_storage::StorageError),

    /// A required field was empty.
    #[error("validation failed: {field} must not be empty")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Every record id has been handed out.
    #[error("record ids exhausted: {last} was the last one")]
    IdsExhausted {
        /// The largest possible id.
        last: RecordId,
    },
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    /// Creates a load error.
    pub fn load(location: impl Into<String>, source: SnapshotError) -> Self {
        Self::Load {
            location: location.into(),
            source,
        }
    }

    /// Creates a validation error.
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Returns true if this is a [`CoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Reasons a snapshot could not be decoded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The bytes are not valid snapshot JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),

    /// A stored id leaves no room for the next one.
    #[error("record id {0} leaves no id for the next record")]
    NoNextId(RecordId),
}
