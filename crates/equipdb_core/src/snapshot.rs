//! JSON snapshot of a record collection.
//!
//! The snapshot is the full contents of the backing file:
//!
//! ```text
//! {
//!   "equipments": [ { "id": 1, "name": ..., "maintenance_history": [] }, ... ],
//!   "next_id": 2
//! }
//! ```
//!
//! Decoding is lenient in the same places existing data files are:
//! `next_id` and `maintenance_history` may be absent.

use crate::error::SnapshotError;
use crate::record::Record;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Decoded contents of a backing file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Records in insertion order.
    pub equipments: Vec<Record>,
    /// The id the next created record receives.
    #[serde(default)]
    pub next_id: RecordId,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    equipments: &'a [Record],
    next_id: RecordId,
}

/// Serializes records and the id counter into backing file bytes.
///
/// # Errors
///
/// Returns an error if a maintenance entry cannot be serialized.
pub fn encode_snapshot(
    records: &[Record],
    next_id: RecordId,
    pretty: bool,
) -> Result<Vec<u8>, serde_json::Error> {
    let snapshot = SnapshotRef {
        equipments: records,
        next_id,
    };
    if pretty {
        serde_json::to_vec_pretty(&snapshot)
    } else {
        serde_json::to_vec(&snapshot)
    }
}

/// Parses backing file bytes into a snapshot.
///
/// Record ids must be unique. If `next_id` does not exceed every id in the
/// file it is raised to one past the largest, so ids are never reissued.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] for malformed input,
/// [`SnapshotError::DuplicateId`] if two records share an id and
/// [`SnapshotError::NoNextId`] if the largest id is `u64::MAX`.
pub fn decode_snapshot(data: &[u8]) -> Result<Snapshot, SnapshotError> {
    let mut snapshot: Snapshot = serde_json::from_slice(data)?;

    let mut seen = HashSet::with_capacity(snapshot.equipments.len());
    for record in &snapshot.equipments {
        if !seen.insert(record.id) {
            return Err(SnapshotError::DuplicateId(record.id));
        }
    }

    if let Some(max_id) = snapshot.equipments.iter().map(|r| r.id).max() {
        if snapshot.next_id <= max_id {
            let repaired = max_id.next().ok_or(SnapshotError::NoNextId(max_id))?;
            warn!(
                next_id = %snapshot.next_id,
                max_id = %max_id,
                "next_id does not exceed stored ids; repairing"
            );
            snapshot.next_id = repaired;
        }
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordFields, Status};
    use serde_json::json;

    fn record(id: u64, name: &str) -> Record {
        Record::new(RecordId::new(id), RecordFields::new(name, "cat", "maker"))
    }

    #[test]
    fn encode_pretty_uses_two_space_indent() {
        let bytes = encode_snapshot(&[], RecordId::FIRST, true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n  \"equipments\": [],\n  \"next_id\": 1\n}");
    }

    #[test]
    fn encode_compact() {
        let bytes = encode_snapshot(&[record(1, "a")], RecordId::new(2), false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["next_id"], json!(2));
        assert_eq!(value["equipments"][0]["name"], json!("a"));
        assert!(!bytes.contains(&b'\n'));
    }

    #[test]
    fn encode_keeps_non_ascii_verbatim() {
        let bytes = encode_snapshot(&[record(1, "Échographe")], RecordId::new(2), true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Échographe"));
        assert!(text.contains("Opérationnel"));
    }

    #[test]
    fn decode_existing_file_layout() {
        let data = r#"{
  "equipments": [
    {
      "id": 4,
      "name": "Défibrillateur",
      "category": "Urgence",
      "manufacturer": "Zoll",
      "serial_number": "Z-77",
      "purchase_date": "12/03/2020",
      "status": "En maintenance",
      "location": "Bloc A",
      "maintenance_history": [{"date": "2023-01-01", "note": "batterie"}]
    }
  ],
  "next_id": 5
}"#;
        let snapshot = decode_snapshot(data.as_bytes()).unwrap();
        assert_eq!(snapshot.next_id, RecordId::new(5));
        let record = &snapshot.equipments[0];
        assert_eq!(record.id, RecordId::new(4));
        assert_eq!(record.status, Status::UnderMaintenance);
        assert_eq!(record.maintenance_history[0]["note"], json!("batterie"));
    }

    #[test]
    fn decode_defaults_missing_next_id() {
        let snapshot = decode_snapshot(br#"{"equipments": []}"#).unwrap();
        assert_eq!(snapshot.next_id, RecordId::FIRST);
    }

    #[test]
    fn decode_repairs_stale_next_id() {
        let data = encode_snapshot(&[record(3, "a"), record(9, "b")], RecordId::new(4), false)
            .unwrap();
        let snapshot = decode_snapshot(&data).unwrap();
        assert_eq!(snapshot.next_id, RecordId::new(10));
    }

    #[test]
    fn decode_keeps_next_id_above_deleted_ids() {
        let data = encode_snapshot(&[record(2, "a")], RecordId::new(8), false).unwrap();
        let snapshot = decode_snapshot(&data).unwrap();
        assert_eq!(snapshot.next_id, RecordId::new(8));
    }

    #[test]
    fn decode_rejects_duplicate_ids() {
        let data = encode_snapshot(&[record(1, "a"), record(1, "b")], RecordId::new(2), false)
            .unwrap();
        let err = decode_snapshot(&data).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateId(id) if id == RecordId::new(1)));
    }

    #[test]
    fn decode_rejects_largest_possible_id() {
        let data = r#"{"equipments": [
            {"id": 18446744073709551615, "name": "a", "category": "b", "manufacturer": "c",
             "serial_number": "", "purchase_date": "", "status": "Opérationnel", "location": ""}
        ], "next_id": 1}"#;
        let err = decode_snapshot(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SnapshotError::NoNextId(id) if id == RecordId::new(u64::MAX)));
    }

    #[test]
    fn decode_accepts_counter_at_max_without_records() {
        let snapshot =
            decode_snapshot(br#"{"equipments": [], "next_id": 18446744073709551615}"#).unwrap();
        assert_eq!(snapshot.next_id, RecordId::new(u64::MAX));
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(matches!(
            decode_snapshot(b"{\"equipments\": [").unwrap_err(),
            SnapshotError::Json(_)
        ));
        assert!(matches!(decode_snapshot(b"").unwrap_err(), SnapshotError::Json(_)));
        assert!(matches!(
            decode_snapshot(br#"{"next_id": 1}"#).unwrap_err(),
            SnapshotError::Json(_)
        ));
    }

    #[test]
    fn round_trip_preserves_order_and_counter() {
        let records = vec![record(5, "e"), record(2, "b"), record(7, "g")];
        let data = encode_snapshot(&records, RecordId::new(11), true).unwrap();
        let snapshot = decode_snapshot(&data).unwrap();
        assert_eq!(snapshot.equipments, records);
        assert_eq!(snapshot.next_id, RecordId::new(11));
    }

    proptest::proptest! {
        #[test]
        fn arbitrary_text_survives_encoding(
            name in "\\PC{1,24}",
            location in "\\PC{0,24}",
            pretty in proptest::bool::ANY,
        ) {
            let fields = RecordFields::new(name, "cat", "maker").location(location);
            let records = vec![Record::new(RecordId::new(1), fields)];
            let data = encode_snapshot(&records, RecordId::new(2), pretty).unwrap();
            let snapshot = decode_snapshot(&data).unwrap();
            proptest::prop_assert_eq!(snapshot.equipments, records);
        }
    }
}
