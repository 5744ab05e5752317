//! Equipment records and their status.

use crate::error::{CoreError, CoreResult};
use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One entry of a record's maintenance history.
///
/// Entries are opaque to the store: they are kept and written back exactly
/// as received.
pub type MaintenanceEntry = serde_json::Value;

/// Operating status of a piece of equipment.
///
/// Stored under the labels used by existing data files; the English
/// variant names are accepted when reading.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    /// In service.
    #[default]
    #[serde(rename = "Opérationnel", alias = "Operational")]
    Operational,
    /// Taken out for maintenance.
    #[serde(rename = "En maintenance", alias = "UnderMaintenance")]
    UnderMaintenance,
    /// Not usable.
    #[serde(rename = "Hors service", alias = "OutOfService")]
    OutOfService,
    /// Being calibrated.
    #[serde(rename = "En calibration", alias = "Calibrating")]
    Calibrating,
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 4] = [
        Status::Operational,
        Status::UnderMaintenance,
        Status::OutOfService,
        Status::Calibrating,
    ];

    /// Returns the English label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Status::Operational => "Operational",
            Status::UnderMaintenance => "Under maintenance",
            Status::OutOfService => "Out of service",
            Status::Calibrating => "Calibrating",
        }
    }

    /// Returns the label written to the backing file.
    #[must_use]
    pub const fn stored_label(self) -> &'static str {
        match self {
            Status::Operational => "Opérationnel",
            Status::UnderMaintenance => "En maintenance",
            Status::OutOfService => "Hors service",
            Status::Calibrating => "En calibration",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    /// Accepts variant names, labels and stored labels, ignoring case,
    /// spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "operational" | "opérationnel" | "operationnel" => Ok(Status::Operational),
            "undermaintenance" | "maintenance" | "enmaintenance" => Ok(Status::UnderMaintenance),
            "outofservice" | "horsservice" => Ok(Status::OutOfService),
            "calibrating" | "calibration" | "encalibration" => Ok(Status::Calibrating),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// The caller-editable fields of a record.
///
/// Everything except the id and the maintenance history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Equipment name. Required.
    pub name: String,
    /// Equipment category. Required.
    pub category: String,
    /// Manufacturer. Required.
    pub manufacturer: String,
    /// Serial number.
    pub serial_number: String,
    /// Purchase date, free-form.
    pub purchase_date: String,
    /// Operating status.
    pub status: Status,
    /// Where the equipment is kept.
    pub location: String,
}

impl RecordFields {
    /// Creates fields with the three required values set and everything
    /// else empty or default.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            manufacturer: manufacturer.into(),
            ..Self::default()
        }
    }

    /// Sets the serial number.
    #[must_use]
    pub fn serial_number(mut self, value: impl Into<String>) -> Self {
        self.serial_number = value.into();
        self
    }

    /// Sets the purchase date.
    #[must_use]
    pub fn purchase_date(mut self, value: impl Into<String>) -> Self {
        self.purchase_date = value.into();
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn status(mut self, value: Status) -> Self {
        self.status = value;
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = value.into();
        self
    }

    /// Checks that name, category and manufacturer are non-blank.
    ///
    /// Fields are checked in that order and the first blank one is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first blank field.
    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("name", &self.name),
            ("category", &self.category),
            ("manufacturer", &self.manufacturer),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CoreError::validation(*field)),
            None => Ok(()),
        }
    }
}

/// One tracked piece of equipment.
///
/// Field order matches the backing file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Equipment name.
    pub name: String,
    /// Equipment category.
    pub category: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Serial number.
    pub serial_number: String,
    /// Purchase date, free-form.
    pub purchase_date: String,
    /// Operating status.
    pub status: Status,
    /// Where the equipment is kept.
    pub location: String,
    /// Append-only maintenance log.
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceEntry>,
}

impl Record {
    pub(crate) fn new(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            manufacturer: fields.manufacturer,
            serial_number: fields.serial_number,
            purchase_date: fields.purchase_date,
            status: fields.status,
            location: fields.location,
            maintenance_history: Vec::new(),
        }
    }

    /// Returns a copy of the editable fields.
    #[must_use]
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            category: self.category.clone(),
            manufacturer: self.manufacturer.clone(),
            serial_number: self.serial_number.clone(),
            purchase_date: self.purchase_date.clone(),
            status: self.status,
            location: self.location.clone(),
        }
    }

    /// Replaces the editable fields, returning the previous ones.
    pub(crate) fn replace_fields(&mut self, fields: RecordFields) -> RecordFields {
        let previous = self.fields();
        self.name = fields.name;
        self.category = fields.category;
        self.manufacturer = fields.manufacturer;
        self.serial_number = fields.serial_number;
        self.purchase_date = fields.purchase_date;
        self.status = fields.status;
        self.location = fields.location;
        previous
    }

    /// Returns true if `needle` (already lowercased) occurs in the name,
    /// category or manufacturer, ignoring case.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.category, &self.manufacturer]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
