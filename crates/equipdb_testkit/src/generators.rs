//! Property-based test generators using proptest.
//!
//! Provides strategies for generating record fields, search terms and
//! operation sequences.

use crate::model::Operation;
use equipdb_core::{RecordFields, Status};
use proptest::prelude::*;

/// Strategy for generating any status.
pub fn status_strategy() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

/// Strategy for non-blank text, suitable for required fields.
pub fn required_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zéÉ][A-Za-zéÉ0-9 -]{0,11}").expect("Invalid regex")
}

/// Strategy for free text, possibly empty.
pub fn free_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9/ -]{0,12}").expect("Invalid regex")
}

/// Strategy for fields that pass validation.
pub fn fields_strategy() -> impl Strategy<Value = RecordFields> {
    (
        required_text_strategy(),
        required_text_strategy(),
        required_text_strategy(),
        free_text_strategy(),
        free_text_strategy(),
        status_strategy(),
        free_text_strategy(),
    )
        .prop_map(
            |(name, category, manufacturer, serial_number, purchase_date, status, location)| {
                RecordFields {
                    name,
                    category,
                    manufacturer,
                    serial_number,
                    purchase_date,
                    status,
                    location,
                }
            },
        )
}

/// Strategy for fields where any required field may be blank.
pub fn any_fields_strategy() -> impl Strategy<Value = RecordFields> {
    (fields_strategy(), 0usize..6).prop_map(|(mut fields, blank)| {
        match blank {
            0 => fields.name.clear(),
            1 => fields.category = "   ".to_string(),
            2 => fields.manufacturer.clear(),
            _ => {}
        }
        fields
    })
}

/// Strategy for search terms: short, mixed case, sometimes empty.
pub fn search_term_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zéÉ -]{0,3}").expect("Invalid regex")
}

/// Strategy for maintenance notes.
pub fn maintenance_note_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z ]{1,20}").expect("Invalid regex")
}

/// Strategy for a single store operation.
///
/// Targets are indices into the live records, resolved by the reference
/// model; `known: false` targets an id that was never issued.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any_fields_strategy().prop_map(Operation::Create),
        2 => (any::<usize>(), any::<bool>(), any_fields_strategy())
            .prop_map(|(target, known, fields)| Operation::Update { target, known, fields }),
        2 => (any::<usize>(), any::<bool>())
            .prop_map(|(target, known)| Operation::Delete { target, known }),
        1 => (any::<usize>(), maintenance_note_strategy())
            .prop_map(|(target, note)| Operation::AppendMaintenance { target, note }),
    ]
}

/// Strategy for a sequence of operations.
pub fn operations_strategy(max_len: usize) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), 0..max_len)
}
