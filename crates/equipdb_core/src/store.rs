//! The record store: an in-memory collection kept in sync with its
//! backing file.

use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::record::{MaintenanceEntry, Record, RecordFields, Status};
use crate::snapshot::{decode_snapshot, encode_snapshot};
use crate::types::RecordId;
use equipdb_storage::{FileBackend, InMemoryBackend, SnapshotBackend, StorageError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Owns the equipment records and the next-id counter.
///
/// Every mutating operation (`create`, `update`, `delete`,
/// `append_maintenance`) writes the full collection to the backing storage
/// before returning. The write is the commit point: if it fails, the
/// in-memory change is undone and the error is returned, so memory never
/// runs ahead of disk.
///
/// Readers get borrowed snapshots (`list`, `search`, `get`); records can
/// only be changed through the store.
///
/// # Example
///
/// ```rust,no_run
/// use equipdb_core::{RecordFields, RecordStore};
///
/// let mut store = RecordStore::open("equipments_data.json".as_ref())?;
/// let record = store.create(RecordFields::new("Ventilator", "ICU", "Hamilton"))?;
/// store.delete(record.id)?;
/// # Ok::<(), equipdb_core::CoreError>(())
/// ```
pub struct RecordStore {
    config: StoreConfig,
    backend: Box<dyn SnapshotBackend>,
    path: Option<PathBuf>,
    records: Vec<Record>,
    next_id: RecordId,
}

impl RecordStore {
    /// Opens the store backed by the JSON file at `path`.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the file is malformed and `Persistence` if it
    /// cannot be read.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Opens the store at `path` with custom configuration.
    pub fn open_with_config(path: &Path, config: StoreConfig) -> CoreResult<Self> {
        let backend = file_backend(path, &config)?;
        let mut store = Self::open_with_backend(config, Box::new(backend))?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Opens a store over an arbitrary snapshot backend.
    pub fn open_with_backend(
        config: StoreConfig,
        backend: Box<dyn SnapshotBackend>,
    ) -> CoreResult<Self> {
        let mut store = Self {
            config,
            backend,
            path: None,
            records: Vec::new(),
            next_id: RecordId::FIRST,
        };
        store.reload()?;
        info!(
            location = %store.backend.describe(),
            records = store.records.len(),
            next_id = %store.next_id,
            "opened record store"
        );
        Ok(store)
    }

    /// Creates an empty store that persists to memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            config: StoreConfig::default(),
            backend: Box::new(InMemoryBackend::new()),
            path: None,
            records: Vec::new(),
            next_id: RecordId::FIRST,
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Adds a new record and returns it.
    ///
    /// The record receives the current `next_id` and an empty maintenance
    /// history, and is appended after all existing records.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a required field is blank (when enabled),
    /// `IdsExhausted` if `next_id` is the largest possible id and
    /// `Persistence` if the collection cannot be saved.
    pub fn create(&mut self, fields: RecordFields) -> CoreResult<Record> {
        self.check(&fields)?;

        let id = self.next_id;
        let next_id = id
            .next()
            .ok_or(CoreError::IdsExhausted { last: id })?;
        self.records.push(Record::new(id, fields));
        self.next_id = next_id;

        self.commit(move |store| {
            store.records.pop();
            store.next_id = id;
        })?;

        debug!(%id, "created record");
        Ok(self.records[self.records.len() - 1].clone())
    }

    /// Replaces every editable field of the record with `id`.
    ///
    /// The id and the maintenance history are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists, `Validation` if a
    /// required field is blank (when enabled) and `Persistence` if the
    /// collection cannot be saved.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> CoreResult<Record> {
        let index = self.index_of(id)?;
        self.check(&fields)?;

        let previous = self.records[index].replace_fields(fields);

        self.commit(move |store| {
            store.records[index].replace_fields(previous);
        })?;

        debug!(%id, "updated record");
        Ok(self.records[index].clone())
    }

    /// Removes the record with `id` and returns it.
    ///
    /// Its id is never handed out again.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists and `Persistence` if the
    /// collection cannot be saved.
    pub fn delete(&mut self, id: RecordId) -> CoreResult<Record> {
        let index = self.index_of(id)?;
        let removed = self.records.remove(index);

        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            return Err(e);
        }

        debug!(%id, "deleted record");
        Ok(removed)
    }

    /// Appends an entry to the maintenance history of the record with `id`.
    ///
    /// Existing entries are never modified.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists and `Persistence` if the
    /// collection cannot be saved.
    pub fn append_maintenance(
        &mut self,
        id: RecordId,
        entry: MaintenanceEntry,
    ) -> CoreResult<Record> {
        let index = self.index_of(id)?;
        self.records[index].maintenance_history.push(entry);

        self.commit(move |store| {
            store.records[index].maintenance_history.pop();
        })?;

        debug!(%id, "appended maintenance entry");
        Ok(self.records[index].clone())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns all records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// Returns records whose name, category or manufacturer contains `term`,
    /// ignoring case, in insertion order.
    ///
    /// An empty term matches every record.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Record> {
        if term.is_empty() {
            return self.records.iter().collect();
        }
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.matches_lowercase(&needle))
            .collect()
    }

    /// Returns the record with `id`, if any.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the id the next created record will receive.
    #[must_use]
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Returns the backing file path, or `None` for non-file backends.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Counts records per status. Every status is present, possibly with
    /// a count of zero.
    #[must_use]
    pub fn status_counts(&self) -> BTreeMap<Status, usize> {
        let mut counts: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
        for record in &self.records {
            *counts.entry(record.status).or_insert(0) += 1;
        }
        counts
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replaces the collection and id counter with the contents of `path`,
    /// and makes `path` the backing file for later mutations.
    ///
    /// A missing file leaves an empty store with `next_id` 1.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the file is malformed and `Persistence` if it
    /// cannot be read. The store is unchanged on error.
    pub fn load(&mut self, path: &Path) -> CoreResult<()> {
        let backend = file_backend(path, &self.config)?;
        let (records, next_id) = read_snapshot(&backend)?;

        info!(path = %path.display(), records = records.len(), "loaded records");
        self.records = records;
        self.next_id = next_id;
        self.backend = Box::new(backend);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Writes the collection and id counter to `path`, atomically.
    ///
    /// The store stays bound to its current backing file.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the file cannot be written.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let mut backend = file_backend(path, &self.config)?;
        let data = self.encode()?;
        backend.write(&data)?;
        info!(path = %path.display(), records = self.records.len(), "saved records");
        Ok(())
    }

    /// Re-reads the collection from the current backing storage.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::load`].
    pub fn reload(&mut self) -> CoreResult<()> {
        let (records, next_id) = read_snapshot(self.backend.as_ref())?;
        self.records = records;
        self.next_id = next_id;
        Ok(())
    }

    fn encode(&self) -> CoreResult<Vec<u8>> {
        encode_snapshot(&self.records, self.next_id, self.config.pretty)
            .map_err(|e| CoreError::Persistence(StorageError::Io(e.into())))
    }

    /// Writes the full collection to the backing storage.
    fn persist(&mut self) -> CoreResult<()> {
        let data = self.encode()?;
        self.backend.write(&data)?;
        debug!(
            location = %self.backend.describe(),
            records = self.records.len(),
            bytes = data.len(),
            "persisted records"
        );
        Ok(())
    }

    /// Persists, running `undo` on failure so the in-memory state matches
    /// what is on disk.
    fn commit<F>(&mut self, undo: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Self),
    {
        match self.persist() {
            Ok(()) => Ok(()),
            Err(e) => {
                undo(self);
                Err(e)
            }
        }
    }

    fn check(&self, fields: &RecordFields) -> CoreResult<()> {
        if self.config.validate_required_fields {
            fields.validate()?;
        }
        Ok(())
    }

    fn index_of(&self, id: RecordId) -> CoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| CoreError::not_found(id))
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("location", &self.backend.describe())
            .field("records", &self.records.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

fn file_backend(path: &Path, config: &StoreConfig) -> CoreResult<FileBackend> {
    let backend = if config.create_if_missing {
        FileBackend::open_with_create_dirs(path)?
    } else {
        FileBackend::open(path)?
    };
    Ok(backend)
}

fn read_snapshot(backend: &dyn SnapshotBackend) -> CoreResult<(Vec<Record>, RecordId)> {
    match backend.read()? {
        None => Ok((Vec::new(), RecordId::FIRST)),
        Some(data) => {
            let snapshot =
                decode_snapshot(&data).map_err(|e| CoreError::load(backend.describe(), e))?;
            Ok((snapshot.equipments, snapshot.next_id))
        }
    }
}
