//! Snapshot backend trait definition.

use crate::error::StorageResult;

/// A durable home for a single serialized snapshot.
///
/// Backends are **opaque byte stores**. EquipDB serializes the whole record
/// collection and hands the bytes over; backends never look inside.
///
/// # Invariants
///
/// - `read` returns `None` until the first successful `write`
/// - `read` after `write(data)` returns exactly `data`
/// - A failed `write` leaves the previously written snapshot readable
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait SnapshotBackend: Send + Sync {
    /// Reads the current snapshot.
    ///
    /// Returns `Ok(None)` if no snapshot has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the snapshot with `data`.
    ///
    /// After this returns successfully, the new snapshot is durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written. The previous
    /// snapshot is left untouched in that case.
    fn write(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns whether a snapshot has been written.
    fn exists(&self) -> bool;

    /// Describes where the snapshot lives, for logs and error messages.
    fn describe(&self) -> String;
}
