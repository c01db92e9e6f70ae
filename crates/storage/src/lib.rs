//! Tabula Storage - Persistence collaborators for the Tabula dataset service.
//!
//! This crate provides:
//!
//! - `DatasetStore`: Owner-scoped insert/fetch/list/rename/delete of datasets
//! - `MemoryStore`: In-memory `DatasetStore` implementation
//! - `ingest`: Normalizes parsed file contents into a column-consistent dataset
//! - `UserDirectory`: Registered accounts and email changes
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{UserId, Value};
//! use tabula_storage::{ingest, DatasetStore, MemoryStore};
//!
//! let records = vec![
//!     vec![("name".to_string(), Value::from("Ada"))],
//!     vec![("name".to_string(), Value::from("Grace"))],
//! ];
//! let upload = ingest::normalize("people.csv", vec!["name".into()], records).unwrap();
//!
//! let owner = UserId::from("ada@example.com");
//! let mut store = MemoryStore::new();
//! let id = store.insert(&owner, upload).unwrap();
//!
//! let dataset = store.fetch(id, &owner).unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert!(store.fetch(id, &UserId::from("eve@example.com")).is_err());
//! ```

#![no_std]

extern crate alloc;

mod dataset_store;
pub mod ingest;
mod memory;
mod users;

pub use dataset_store::{DatasetStore, NewDataset};
pub use memory::MemoryStore;
pub use users::UserDirectory;
