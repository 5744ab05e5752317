//! # EquipDB Storage
//!
//! Snapshot storage backends for EquipDB.
//!
//! Backends hold exactly one **opaque byte snapshot**: the serialized
//! record collection. They never interpret the bytes they store.
//!
//! ## Design Principles
//!
//! - A write replaces the whole snapshot; there is no append or partial update
//! - A write either lands completely or leaves the previous snapshot intact
//! - "Nothing stored yet" is distinct from "stored an empty snapshot"
//! - EquipDB owns the snapshot format
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral stores
//! - [`FileBackend`] - For persistent storage using write-then-rename
//!
//! ## Example
//!
//! ```rust
//! use equipdb_storage::{SnapshotBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(backend.read().unwrap().is_none());
//! backend.write(b"{}").unwrap();
//! assert_eq!(backend.read().unwrap().as_deref(), Some(&b"{}"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::SnapshotBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
