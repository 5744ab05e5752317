//! Verify command implementation.

use equipdb_core::{RecordId, Snapshot};
use equipdb_storage::{FileBackend, SnapshotBackend};
use std::collections::HashSet;
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of records checked.
    pub records_checked: usize,
    /// List of problems found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FileBackend::open(path)?;
    println!("Verifying inventory at {:?}", backend.path());
    println!();

    let data = backend
        .read()?
        .ok_or_else(|| format!("No inventory found at {:?}", backend.path()))?;

    let result = verify(&data);
    println!("Records checked: {}", result.records_checked);
    for error in &result.errors {
        println!("  ✗ {error}");
    }

    println!();
    if result.is_ok() {
        println!("✓ Inventory verification passed");
        Ok(())
    } else {
        println!("✗ Inventory verification failed");
        Err("Verification failed".into())
    }
}

/// Checks raw snapshot bytes without repairing anything.
pub fn verify(data: &[u8]) -> VerifyResult {
    let mut result = VerifyResult::default();

    let snapshot: Snapshot = match serde_json::from_slice(data) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            result.errors.push(format!("malformed JSON: {e}"));
            return result;
        }
    };

    let mut seen = HashSet::new();
    let mut max_id: Option<RecordId> = None;
    for record in &snapshot.equipments {
        result.records_checked += 1;

        if !seen.insert(record.id) {
            result.errors.push(format!("duplicate id {}", record.id));
        }
        max_id = max_id.max(Some(record.id));

        if let Err(e) = record.fields().validate() {
            result.errors.push(format!("record {}: {e}", record.id));
        }
    }

    if let Some(max_id) = max_id {
        if snapshot.next_id <= max_id {
            result.errors.push(format!(
                "next_id {} does not exceed largest id {}",
                snapshot.next_id, max_id
            ));
        }
    }

    result
}
