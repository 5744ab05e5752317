//! Text rendering for records.

use equipdb_core::Record;
use std::fmt::Write;

const HEADERS: [&str; 7] = [
    "ID",
    "Name",
    "Category",
    "Manufacturer",
    "Serial No.",
    "Status",
    "Location",
];

fn row(record: &Record) -> [String; 7] {
    [
        record.id.to_string(),
        record.name.clone(),
        record.category.clone(),
        record.manufacturer.clone(),
        record.serial_number.clone(),
        record.status.to_string(),
        record.location.clone(),
    ]
}

/// Renders records as an aligned table followed by a total line.
pub fn render_table(records: &[&Record]) -> String {
    let rows: Vec<[String; 7]> = records.iter().map(|r| row(r)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    let _ = writeln!(out, "Total: {} record(s)", records.len());
    out
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Renders one record with all of its fields.
pub fn render_record(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Record {}", record.id);
    let _ = writeln!(out, "  Name:          {}", record.name);
    let _ = writeln!(out, "  Category:      {}", record.category);
    let _ = writeln!(out, "  Manufacturer:  {}", record.manufacturer);
    let _ = writeln!(out, "  Serial No.:    {}", record.serial_number);
    let _ = writeln!(out, "  Purchase date: {}", record.purchase_date);
    let _ = writeln!(out, "  Status:        {}", record.status);
    let _ = writeln!(out, "  Location:      {}", record.location);
    let _ = writeln!(
        out,
        "  Maintenance:   {} entr{}",
        record.maintenance_history.len(),
        if record.maintenance_history.len() == 1 { "y" } else { "ies" }
    );
    for entry in &record.maintenance_history {
        let _ = writeln!(out, "    - {entry}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipdb_core::{RecordFields, RecordStore, Status};

    #[test]
    fn table_aligns_columns_and_counts() {
        let mut store = RecordStore::in_memory();
        store
            .create(RecordFields::new("Échographe", "Imagerie", "GE").status(Status::Calibrating))
            .unwrap();
        store
            .create(RecordFields::new("Pump", "Therapy", "Baxter"))
            .unwrap();
        let records: Vec<&Record> = store.list().iter().collect();

        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("ID  Name        Category"));
        assert!(lines[2].starts_with("1   Échographe  Imagerie"));
        assert!(lines[2].contains("Calibrating"));
        assert!(lines[3].starts_with("2   Pump        Therapy"));
        assert_eq!(lines[4], "Total: 2 record(s)");
    }

    #[test]
    fn empty_table_has_header_and_total() {
        let table = render_table(&[]);
        assert!(table.starts_with("ID"));
        assert!(table.ends_with("Total: 0 record(s)\n"));
    }

    #[test]
    fn record_view_lists_history() {
        let mut store = RecordStore::in_memory();
        let record = store
            .create(RecordFields::new("Monitor", "Cardiology", "Philips"))
            .unwrap();
        let record = store
            .append_maintenance(record.id, serde_json::json!("calibrated"))
            .unwrap();

        let text = render_record(&record);
        assert!(text.starts_with("Record 1\n"));
        assert!(text.contains("Maintenance:   1 entry"));
        assert!(text.contains("- \"calibrated\""));
    }
}
