//! Export command implementation.

use equipdb_core::RecordStore;
use std::path::Path;
use tracing::info;

/// Writes a copy of the inventory at `path` to `output`.
///
/// The copy is written atomically; the source file is left untouched.
pub fn run(path: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No inventory found at {:?}", path).into());
    }
    if path == output {
        return Err("Export destination must differ from the inventory file".into());
    }

    info!("Exporting {:?} to {:?}", path, output);
    let store = RecordStore::open(path)?;
    store.save(output)?;

    println!("✓ Export created successfully");
    println!("  Path:    {:?}", output);
    println!("  Records: {}", store.len());
    println!("  Next id: {}", store.next_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipdb_core::RecordFields;
    use tempfile::tempdir;

    #[test]
    fn export_copies_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let output = dir.path().join("backup").join("copy.json");

        let mut store = RecordStore::open(&path).unwrap();
        store
            .create(RecordFields::new("Autoclave", "Sterilization", "Tuttnauer"))
            .unwrap();

        run(&path, &output).unwrap();

        let copy = RecordStore::open(&output).unwrap();
        assert_eq!(copy.list(), store.list());
        assert_eq!(copy.next_id(), store.next_id());
    }

    #[test]
    fn export_requires_existing_inventory() {
        let dir = tempdir().unwrap();
        let result = run(&dir.path().join("none.json"), &dir.path().join("out.json"));
        assert!(result.is_err());
    }
}
