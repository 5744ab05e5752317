//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up file-backed stores in
//! temporary directories.

use equipdb_core::{RecordFields, RecordStore, Status, StoreConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name used for fixture backing files.
pub const FIXTURE_FILE: &str = "equipments_data.json";

/// A file-backed test store with automatic cleanup.
pub struct TestStore {
    /// The store instance.
    pub store: RecordStore,
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates an empty store backed by a file in a fresh temp directory.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(FIXTURE_FILE);
        let store = RecordStore::open_with_config(&path, config).expect("Failed to open store");

        Self {
            store,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the temporary directory holding the backing file.
    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Opens a second, independent store on the same backing file.
    ///
    /// This is what a restarted process would see.
    pub fn reopen(&self) -> RecordStore {
        RecordStore::open(&self.path).expect("Failed to reopen store")
    }

    /// Returns the raw backing file contents.
    pub fn file_contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("Failed to read backing file")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = RecordStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Runs a test with a temporary file-backed store.
///
/// # Example
///
/// ```rust,ignore
/// use equipdb_testkit::with_temp_store;
///
/// #[test]
/// fn my_test() {
///     with_temp_store(|store| {
///         assert!(store.is_empty());
///     });
/// }
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut RecordStore) -> R,
{
    let mut test_store = TestStore::new();
    f(&mut test_store.store)
}

/// Returns valid fields with the given name and fixed other values.
pub fn sample_fields(name: &str) -> RecordFields {
    RecordFields::new(name, "Monitoring", "Philips")
        .serial_number(format!("SN-{}", name.len()))
        .purchase_date("2023-01-15")
        .location("Ward 3")
}

/// Returns a small, varied inventory for scenario tests.
pub fn sample_inventory() -> Vec<RecordFields> {
    vec![
        RecordFields::new("Ventilator", "Respiratory", "Hamilton")
            .serial_number("HM-001")
            .location("ICU"),
        RecordFields::new("Infusion Pump", "Therapy", "Baxter")
            .status(Status::UnderMaintenance)
            .location("Ward 2"),
        RecordFields::new("ventilator-2", "Respiratory", "Dräger")
            .status(Status::Calibrating)
            .location("ICU"),
        RecordFields::new("Défibrillateur", "Urgences", "Zoll")
            .status(Status::OutOfService)
            .purchase_date("12/03/2020"),
    ]
}

/// Creates a store pre-filled with [`sample_inventory`].
pub fn populated_store() -> TestStore {
    let mut test_store = TestStore::new();
    for fields in sample_inventory() {
        test_store
            .create(fields)
            .expect("Failed to create sample record");
    }
    test_store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_empty() {
        let store = TestStore::new();
        assert!(store.is_empty());
        assert!(!store.path().exists());
        assert!(store.path().starts_with(store.dir()));
    }

    #[test]
    fn reopen_sees_committed_records() {
        let mut store = TestStore::new();
        store.create(sample_fields("Monitor")).unwrap();

        let reopened = store.reopen();
        assert_eq!(reopened.list(), store.list());
        assert!(store.file_contents().contains("\"Monitor\""));
    }

    #[test]
    fn populated_store_has_sample_inventory() {
        let store = populated_store();
        assert_eq!(store.len(), sample_inventory().len());
    }

    #[test]
    fn with_temp_store_returns_closure_value() {
        let id = with_temp_store(|store| store.create(sample_fields("x")).unwrap().id);
        assert_eq!(id.as_u64(), 1);
    }
}
