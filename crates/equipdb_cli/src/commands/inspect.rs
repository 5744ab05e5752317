//! Inspect command implementation.

use equipdb_core::{RecordStore, Status};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Inventory inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Inventory file path.
    pub path: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Number of records.
    pub record_count: usize,
    /// Id the next record will receive.
    pub next_id: u64,
    /// Total maintenance entries across all records.
    pub maintenance_entries: usize,
    /// Record count per status.
    pub statuses: Vec<StatusCount>,
}

/// Number of records in one status.
#[derive(Debug, Serialize)]
pub struct StatusCount {
    /// Status label.
    pub status: String,
    /// Number of records.
    pub count: usize,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(path)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Collects statistics for the inventory at `path`.
pub fn inspect(path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No inventory found at {:?}", path).into());
    }

    let store = RecordStore::open(path)?;
    let statuses = store
        .status_counts()
        .into_iter()
        .map(|(status, count): (Status, usize)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();

    Ok(InspectResult {
        path: path.display().to_string(),
        file_size: fs::metadata(path)?.len(),
        record_count: store.len(),
        next_id: store.next_id().as_u64(),
        maintenance_entries: store
            .list()
            .iter()
            .map(|r| r.maintenance_history.len())
            .sum(),
        statuses,
    })
}

fn print_text_output(result: &InspectResult) {
    println!("EquipDB Inventory Inspection");
    println!("============================");
    println!();
    println!("Path: {}", result.path);
    println!("Size: {}", format_size(result.file_size));
    println!();
    println!("Records:");
    println!("  Total:               {}", result.record_count);
    println!("  Next id:             {}", result.next_id);
    println!("  Maintenance entries: {}", result.maintenance_entries);
    println!();
    println!("Status:");
    for entry in &result.statuses {
        println!("  {:<18} {}", entry.status, entry.count);
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipdb_core::RecordFields;
    use tempfile::tempdir;

    #[test]
    fn inspect_counts_statuses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        let mut store = RecordStore::open(&path).unwrap();
        store
            .create(RecordFields::new("a", "b", "c").status(Status::OutOfService))
            .unwrap();
        let record = store.create(RecordFields::new("d", "e", "f")).unwrap();
        store.delete(record.id).unwrap();

        let result = inspect(&path).unwrap();
        assert_eq!(result.record_count, 1);
        assert_eq!(result.next_id, 3);
        assert_eq!(result.statuses.len(), 4);
        let out_of_service = result
            .statuses
            .iter()
            .find(|s| s.status == "Out of service")
            .unwrap();
        assert_eq!(out_of_service.count, 1);
        assert!(result.file_size > 0);
    }

    #[test]
    fn inspect_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(inspect(&dir.path().join("none.json")).is_err());
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(12), "12 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
