//! Core type definitions for EquipDB.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a record.
///
/// Record IDs are assigned by the store, monotonically increasing and never
/// reused, even after the record they named is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// The id handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Creates a new record ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the following record ID, or `None` once the id space is
    /// exhausted.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_ordering() {
        let a = RecordId::new(1);
        let b = RecordId::new(2);
        assert!(a < b);
        assert_eq!(a.next(), Some(b));
    }

    #[test]
    fn record_id_next_stops_at_max() {
        assert_eq!(RecordId::new(u64::MAX).next(), None);
        assert_eq!(
            RecordId::new(u64::MAX - 1).next(),
            Some(RecordId::new(u64::MAX))
        );
    }

    #[test]
    fn record_id_default_is_first() {
        assert_eq!(RecordId::default(), RecordId::FIRST);
        assert_eq!(RecordId::FIRST.as_u64(), 1);
    }

    #[test]
    fn record_id_serializes_as_integer() {
        let json = serde_json::to_string(&RecordId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(back, RecordId::new(42));
    }
}
