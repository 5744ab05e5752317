//! # EquipDB Core
//!
//! Equipment record store for EquipDB.
//!
//! This crate provides:
//! - [`Record`] and [`RecordFields`]: one tracked piece of equipment
//! - [`RecordStore`]: the in-memory collection, kept in sync with a JSON
//!   backing file on every mutation
//! - [`StoreConfig`]: options for opening a store
//!
//! ## Example
//!
//! ```rust
//! use equipdb_core::{RecordFields, RecordStore, Status};
//!
//! let mut store = RecordStore::in_memory();
//! let pump = store
//!     .create(RecordFields::new("Infusion Pump", "Therapy", "Baxter").status(Status::Calibrating))
//!     .unwrap();
//! assert_eq!(pump.id.as_u64(), 1);
//! assert_eq!(store.search("pump").len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod record;
mod snapshot;
mod store;
mod types;

pub use config::StoreConfig;
pub use error::{CoreError, CoreResult, SnapshotError};
pub use record::{MaintenanceEntry, ParseStatusError, Record, RecordFields, Status};
pub use snapshot::{decode_snapshot, encode_snapshot, Snapshot};
pub use store::RecordStore;
pub use types::RecordId;

pub use equipdb_storage::{FileBackend, InMemoryBackend, SnapshotBackend, StorageError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
