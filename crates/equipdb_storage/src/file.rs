//! File-based snapshot backend for persistent storage.

use crate::backend::SnapshotBackend;
use crate::error::{StorageError, StorageResult};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to the backing file name for in-flight writes.
const TEMP_SUFFIX: &str = ".tmp";

/// A file-based snapshot backend.
///
/// The snapshot lives in a single file. Writes never modify that file in
/// place; they go through a sibling temporary file.
///
/// # Durability
///
/// `write()` follows the write-then-rename pattern:
/// 1. Write the snapshot to `<file>.tmp`
/// 2. `sync_all()` the temporary file
/// 3. Rename it over the backing file
/// 4. Fsync the parent directory so the rename itself is durable
///
/// A crash at any point leaves either the old or the new snapshot on disk,
/// never a truncated one.
///
/// # Example
///
/// ```no_run
/// use equipdb_storage::{SnapshotBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("equipments_data.json")).unwrap();
/// backend.write(br#"{"equipments":[],"next_id":1}"#).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    temp_path: PathBuf,
    create_dirs: bool,
}

impl FileBackend {
    /// Opens a file backend bound to `path`.
    ///
    /// The file itself does not need to exist; it is created on the first
    /// write. Its parent directory must exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MissingDirectory`] if the parent directory
    /// does not exist.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let parent = parent_dir(path);
        if !parent.is_dir() {
            return Err(StorageError::MissingDirectory(parent.to_path_buf()));
        }
        Ok(Self::bind(path, false))
    }

    /// Opens a file backend whose parent directories are created on the
    /// first write.
    ///
    /// Nothing is created on disk until then, so reading through a path
    /// whose directory does not exist simply finds no snapshot.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        Ok(Self::bind(path, true))
    }

    fn bind(path: &Path, create_dirs: bool) -> Self {
        let mut temp_name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        temp_name.push(TEMP_SUFFIX);

        Self {
            path: path.to_path_buf(),
            temp_path: path.with_file_name(temp_name),
            create_dirs,
        }
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path used for in-flight writes.
    #[must_use]
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Syncs the parent directory so a completed rename survives a crash.
    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        let parent = parent_dir(&self.path);
        let dir = File::open(parent).map_err(|e| StorageError::file(parent, e))?;
        dir.sync_all().map_err(|e| StorageError::file(parent, e))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        // NTFS journals metadata; directory handles cannot be fsynced
        Ok(())
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => {
                debug!(path = %self.path.display(), bytes = data.len(), "read snapshot");
                Ok(Some(data))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::file(&self.path, e)),
        }
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        if self.create_dirs {
            let parent = parent_dir(&self.path);
            fs::create_dir_all(parent).map_err(|e| StorageError::file(parent, e))?;
        }

        let temp = &self.temp_path;

        let result = File::create(temp).and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });
        if let Err(e) = result {
            let _ = fs::remove_file(temp);
            return Err(StorageError::file(temp, e));
        }

        if let Err(e) = fs::rename(temp, &self.path) {
            let _ = fs::remove_file(temp);
            return Err(StorageError::file(&self.path, e));
        }

        self.sync_directory()?;

        debug!(path = %self.path.display(), bytes = data.len(), "wrote snapshot");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Returns the directory holding `path`, treating a bare file name as
/// relative to the current directory.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_missing_reads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let backend = FileBackend::open(&path).unwrap();
        assert!(backend.read().unwrap().is_none());
        assert!(!backend.exists());
        assert!(!path.exists());
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write(b"hello").unwrap();

        assert!(backend.exists());
        assert_eq!(backend.read().unwrap().unwrap(), b"hello");
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn file_write_replaces_whole_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write(b"a much longer first snapshot").unwrap();
        backend.write(b"short").unwrap();

        assert_eq!(backend.read().unwrap().unwrap(), b"short");
    }

    #[test]
    fn file_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write(b"data").unwrap();

        assert!(!backend.temp_path().exists());
        assert_eq!(backend.temp_path(), dir.path().join("data.json.tmp"));
    }

    #[test]
    fn file_stale_temp_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"committed").unwrap();
        fs::write(dir.path().join("data.json.tmp"), b"half-writ").unwrap();

        let mut backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"committed");

        backend.write(b"next").unwrap();
        assert_eq!(backend.read().unwrap().unwrap(), b"next");
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        {
            let mut backend = FileBackend::open(&path).unwrap();
            backend.write(b"persistent data").unwrap();
        }

        {
            let backend = FileBackend::open(&path).unwrap();
            assert_eq!(backend.read().unwrap().unwrap(), b"persistent data");
        }
    }

    #[test]
    fn file_open_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let result = FileBackend::open(&path);
        assert!(matches!(result, Err(StorageError::MissingDirectory(_))));
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("data.json");

        let mut backend = FileBackend::open_with_create_dirs(&path).unwrap();
        assert!(!dir.path().join("nested").exists());
        assert!(backend.read().unwrap().is_none());

        backend.write(b"x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_read_directory_fails() {
        let dir = tempdir().unwrap();

        let backend = FileBackend::open(dir.path()).unwrap();
        let result = backend.read();
        assert!(matches!(result, Err(StorageError::File { .. })));
    }

    #[test]
    fn bare_file_name_uses_current_dir() {
        assert_eq!(parent_dir(Path::new("data.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/data.json")), Path::new("a"));
    }

    #[test]
    fn file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.path(), path);
        assert_eq!(backend.describe(), path.display().to_string());
    }
}
