//! Record management commands.

use crate::output;
use equipdb_core::{RecordFields, RecordId, RecordStore, Status};
use serde_json::json;
use std::path::Path;
use tracing::info;

/// Field values supplied on the command line. `None` means "not given".
#[derive(Debug, Default)]
pub struct FieldArgs {
    /// Equipment name.
    pub name: Option<String>,
    /// Equipment category.
    pub category: Option<String>,
    /// Manufacturer.
    pub manufacturer: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Purchase date.
    pub purchase_date: Option<String>,
    /// Status, parsed leniently.
    pub status: Option<String>,
    /// Location.
    pub location: Option<String>,
}

impl FieldArgs {
    /// Overlays the given values on `base`.
    pub fn merge_into(self, base: RecordFields) -> Result<RecordFields, Box<dyn std::error::Error>> {
        let status = match self.status {
            Some(s) => s.parse::<Status>()?,
            None => base.status,
        };
        Ok(RecordFields {
            name: self.name.unwrap_or(base.name),
            category: self.category.unwrap_or(base.category),
            manufacturer: self.manufacturer.unwrap_or(base.manufacturer),
            serial_number: self.serial_number.unwrap_or(base.serial_number),
            purchase_date: self.purchase_date.unwrap_or(base.purchase_date),
            status,
            location: self.location.unwrap_or(base.location),
        })
    }
}

/// Adds a record.
pub fn add(path: &Path, fields: FieldArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open(path)?;
    let fields = fields.merge_into(RecordFields::default())?;
    let record = store.create(fields)?;

    info!(id = %record.id, "record added");
    println!("✓ Added '{}' with id {}", record.name, record.id);
    Ok(())
}

/// Updates a record, keeping fields that were not supplied.
pub fn update(path: &Path, id: u64, fields: FieldArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open(path)?;
    let id = RecordId::new(id);
    let current = store
        .get(id)
        .map(|record| record.fields())
        .ok_or_else(|| equipdb_core::CoreError::not_found(id))?;

    let record = store.update(id, fields.merge_into(current)?)?;

    info!(id = %record.id, "record updated");
    println!("✓ Updated record {}", record.id);
    Ok(())
}

/// Deletes a record.
pub fn delete(path: &Path, id: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open(path)?;
    let removed = store.delete(RecordId::new(id))?;

    info!(id = %removed.id, "record deleted");
    println!("✓ Deleted '{}'", removed.name);
    Ok(())
}

/// Prints a single record.
pub fn show(path: &Path, id: u64, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::open(path)?;
    let id = RecordId::new(id);
    let record = store
        .get(id)
        .ok_or_else(|| equipdb_core::CoreError::not_found(id))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(record)?),
        _ => print!("{}", output::render_record(record)),
    }
    Ok(())
}

/// Prints every record.
pub fn list(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::open(path)?;
    let records: Vec<_> = store.list().iter().collect();
    print_records(&records, format)
}

/// Prints records matching `term`.
pub fn search(path: &Path, term: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::open(path)?;
    print_records(&store.search(term), format)
}

/// Appends a maintenance entry to a record.
pub fn log_maintenance(
    path: &Path,
    id: u64,
    note: &str,
    date: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = RecordStore::open(path)?;
    let entry = json!({ "date": date, "note": note });
    let record = store.append_maintenance(RecordId::new(id), entry)?;

    println!(
        "✓ Logged maintenance for record {} ({} entries)",
        record.id,
        record.maintenance_history.len()
    );
    Ok(())
}

fn print_records(
    records: &[&equipdb_core::Record],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(records)?),
        _ => print!("{}", output::render_table(records)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(name: &str) -> FieldArgs {
        FieldArgs {
            name: Some(name.to_string()),
            category: Some("Imaging".to_string()),
            manufacturer: Some("Siemens".to_string()),
            ..FieldArgs::default()
        }
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let base = RecordFields::new("X-Ray", "Imaging", "Siemens")
            .location("Room 1")
            .status(Status::Calibrating);
        let merged = FieldArgs {
            location: Some("Room 2".to_string()),
            ..FieldArgs::default()
        }
        .merge_into(base)
        .unwrap();

        assert_eq!(merged.name, "X-Ray");
        assert_eq!(merged.location, "Room 2");
        assert_eq!(merged.status, Status::Calibrating);
    }

    #[test]
    fn merge_parses_status() {
        let merged = FieldArgs {
            status: Some("out-of-service".to_string()),
            ..FieldArgs::default()
        }
        .merge_into(RecordFields::default())
        .unwrap();
        assert_eq!(merged.status, Status::OutOfService);

        let result = FieldArgs {
            status: Some("lost".to_string()),
            ..FieldArgs::default()
        }
        .merge_into(RecordFields::default());
        assert!(result.is_err());
    }

    #[test]
    fn add_update_delete_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("equipments_data.json");

        add(&path, args("Ultrasound")).unwrap();
        update(
            &path,
            1,
            FieldArgs {
                serial_number: Some("US-9".to_string()),
                ..FieldArgs::default()
            },
        )
        .unwrap();

        let store = RecordStore::open(&path).unwrap();
        let record = store.get(RecordId::new(1)).unwrap();
        assert_eq!(record.name, "Ultrasound");
        assert_eq!(record.serial_number, "US-9");

        log_maintenance(&path, 1, "probe cleaned", "2024-05-01").unwrap();
        delete(&path, 1).unwrap();
        assert!(RecordStore::open(&path).unwrap().is_empty());
    }

    #[test]
    fn add_without_required_fields_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("equipments_data.json");

        assert!(add(&path, FieldArgs::default()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn update_unknown_id_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("equipments_data.json");

        assert!(update(&path, 3, args("x")).is_err());
        assert!(delete(&path, 3).is_err());
        assert!(show(&path, 3, "text").is_err());
    }
}
