//! In-memory snapshot backend for testing.

use crate::backend::SnapshotBackend;
use crate::error::StorageResult;
use parking_lot::RwLock;

/// An in-memory snapshot backend.
///
/// This backend keeps the snapshot in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// # Example
///
/// ```rust
/// use equipdb_storage::{SnapshotBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// backend.write(b"test data").unwrap();
/// assert_eq!(backend.data(), Some(b"test data".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<Option<Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend holding an existing snapshot.
    ///
    /// Useful for testing load and recovery scenarios.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(Some(data)),
        }
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.read().clone()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().clone())
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        *self.data.write() = Some(data.to_vec());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.data.read().is_some()
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
