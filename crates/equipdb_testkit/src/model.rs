//! Reference model of the record store.
//!
//! A deliberately naive reimplementation used as an oracle: property tests
//! run the same operations against the model and a real store and compare.

use equipdb_core::{CoreError, MaintenanceEntry, RecordFields, RecordId, RecordStore};
use serde_json::json;

/// An operation as generated, before targets are resolved to ids.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Create a record.
    Create(RecordFields),
    /// Update the live record at `target` (or an unknown id).
    Update {
        /// Index hint into the live records.
        target: usize,
        /// Whether to target an existing record.
        known: bool,
        /// New field values.
        fields: RecordFields,
    },
    /// Delete the live record at `target` (or an unknown id).
    Delete {
        /// Index hint into the live records.
        target: usize,
        /// Whether to target an existing record.
        known: bool,
    },
    /// Append a maintenance note to the live record at `target`.
    AppendMaintenance {
        /// Index hint into the live records.
        target: usize,
        /// The note text.
        note: String,
    },
}

/// An operation with its target resolved to a concrete id.
#[derive(Debug, Clone)]
pub enum Command {
    /// Create a record.
    Create(RecordFields),
    /// Update a record.
    Update(RecordId, RecordFields),
    /// Delete a record.
    Delete(RecordId),
    /// Append a maintenance entry.
    AppendMaintenance(RecordId, MaintenanceEntry),
}

/// What an operation did, in terms both the model and the store can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A record was created with this id.
    Created(RecordId),
    /// A record was updated.
    Updated,
    /// A record was deleted.
    Deleted,
    /// A maintenance entry was appended.
    Appended,
    /// The target id does not exist.
    NotFound,
    /// Fields failed validation.
    Invalid,
}

/// One record as the model sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    /// Assigned id.
    pub id: RecordId,
    /// Current fields.
    pub fields: RecordFields,
    /// Maintenance entries.
    pub history: Vec<MaintenanceEntry>,
}

/// Naive reference implementation of the store semantics.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    records: Vec<ModelRecord>,
    next_id: u64,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Returns the live records in insertion order.
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    /// Returns the next id the model would assign.
    pub fn next_id(&self) -> RecordId {
        RecordId::new(self.next_id)
    }

    /// Resolves an operation's target against the current records.
    pub fn resolve(&self, op: &Operation) -> Command {
        match op {
            Operation::Create(fields) => Command::Create(fields.clone()),
            Operation::Update {
                target,
                known,
                fields,
            } => Command::Update(self.target_id(*target, *known), fields.clone()),
            Operation::Delete { target, known } => {
                Command::Delete(self.target_id(*target, *known))
            }
            Operation::AppendMaintenance { target, note } => {
                Command::AppendMaintenance(self.target_id(*target, true), json!({ "note": note }))
            }
        }
    }

    fn target_id(&self, target: usize, known: bool) -> RecordId {
        if known && !self.records.is_empty() {
            self.records[target % self.records.len()].id
        } else {
            // Never issued: at or beyond the counter
            RecordId::new(self.next_id + (target % 1000) as u64)
        }
    }

    /// Applies a command to the model.
    pub fn apply(&mut self, command: &Command) -> Outcome {
        match command {
            Command::Create(fields) => {
                if fields.validate().is_err() {
                    return Outcome::Invalid;
                }
                let id = RecordId::new(self.next_id);
                self.next_id += 1;
                self.records.push(ModelRecord {
                    id,
                    fields: fields.clone(),
                    history: Vec::new(),
                });
                Outcome::Created(id)
            }
            Command::Update(id, fields) => match self.position(*id) {
                None => Outcome::NotFound,
                Some(_) if fields.validate().is_err() => Outcome::Invalid,
                Some(index) => {
                    self.records[index].fields = fields.clone();
                    Outcome::Updated
                }
            },
            Command::Delete(id) => match self.position(*id) {
                None => Outcome::NotFound,
                Some(index) => {
                    self.records.remove(index);
                    Outcome::Deleted
                }
            },
            Command::AppendMaintenance(id, entry) => match self.position(*id) {
                None => Outcome::NotFound,
                Some(index) => {
                    self.records[index].history.push(entry.clone());
                    Outcome::Appended
                }
            },
        }
    }

    /// Returns ids of records matching `term`, the slow way.
    pub fn search(&self, term: &str) -> Vec<RecordId> {
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.fields.name.to_lowercase().contains(&term)
                    || r.fields.category.to_lowercase().contains(&term)
                    || r.fields.manufacturer.to_lowercase().contains(&term)
            })
            .map(|r| r.id)
            .collect()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Panics unless `store` holds exactly the model's records and counter.
    pub fn assert_matches(&self, store: &RecordStore) {
        let actual: Vec<ModelRecord> = store
            .list()
            .iter()
            .map(|r| ModelRecord {
                id: r.id,
                fields: r.fields(),
                history: r.maintenance_history.clone(),
            })
            .collect();
        assert_eq!(actual, self.records, "store records diverged from model");
        assert_eq!(store.next_id(), self.next_id(), "next_id diverged from model");
    }
}

/// Executes a command against a real store and reports the outcome.
///
/// # Panics
///
/// Panics on errors the model cannot produce, such as I/O failures.
pub fn execute(store: &mut RecordStore, command: &Command) -> Outcome {
    let result = match command {
        Command::Create(fields) => store.create(fields.clone()).map(|r| Outcome::Created(r.id)),
        Command::Update(id, fields) => store.update(*id, fields.clone()).map(|_| Outcome::Updated),
        Command::Delete(id) => store.delete(*id).map(|_| Outcome::Deleted),
        Command::AppendMaintenance(id, entry) => store
            .append_maintenance(*id, entry.clone())
            .map(|_| Outcome::Appended),
    };

    match result {
        Ok(outcome) => outcome,
        Err(CoreError::NotFound { .. }) => Outcome::NotFound,
        Err(CoreError::Validation { .. }) => Outcome::Invalid,
        Err(e) => panic!("unexpected store error: {e}"),
    }
}
