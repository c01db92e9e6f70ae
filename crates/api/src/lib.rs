//! Tabula API - Service boundary for the Tabula dataset service.
//!
//! This crate ties the engine crates to the outside world:
//!
//! - `ApiConfig`: TOML configuration with defaults and validation
//! - `logging`: `tracing` subscriber setup
//! - `IdentityProvider`: Bearer credential verification
//! - `convert`: JSON <-> `Value`/`Row` conversion
//! - `Service`: Account, upload, listing and analytics operations
//! - `ApiError`: Status code and message for a failed request
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tabula_api::{ApiConfig, ListParams, Service, StaticIdentity, UploadRequest};
//! use tabula_core::UserId;
//! use tabula_storage::MemoryStore;
//!
//! let mut service = Service::new(ApiConfig::default(), MemoryStore::new(), StaticIdentity::new()).unwrap();
//! service.signup("ada@example.com").unwrap();
//! let token = service.identity_mut().issue(&UserId::from("ada@example.com"));
//! let user = service.authenticate(&format!("Bearer {}", token)).unwrap();
//!
//! let request: UploadRequest = serde_json::from_value(json!({
//!     "filename": "scores.csv",
//!     "size": 64,
//!     "columns": ["team", "score"],
//!     "records": [{"team": "A", "score": 5}, {"team": "B", "score": 10}],
//! }))
//! .unwrap();
//! let receipt = service.upload(&user, request).unwrap();
//!
//! let page = service.list_rows(&user, &receipt.id, ListParams::default()).unwrap();
//! assert_eq!(page.total_count, 2);
//! ```

pub mod config;
pub mod convert;
mod error;
pub mod identity;
pub mod logging;
pub mod params;
mod service;
pub mod views;

pub use config::{ApiConfig, LogConfig};
pub use error::{status_of, ApiError};
pub use identity::{IdentityProvider, StaticIdentity};
pub use params::{AggregateParams, EmailUpdate, ListParams, RenameRequest, UploadRequest};
pub use service::Service;
pub use views::{
    AggregateResponse, DatasetView, EmailUpdated, GroupView, MessageResponse, ProfileResponse,
    RowsResponse, UploadReceipt,
};
