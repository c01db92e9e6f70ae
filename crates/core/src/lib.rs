//! Tabula Core - Core types for the Tabula dataset service.
//!
//! This crate provides the foundational types shared by the query engine,
//! the row store and the service boundary:
//!
//! - `Value`: A dynamically typed cell (Null, Boolean, Int64, Float64, String)
//! - `Row`: Positional values aligned with a dataset's column list
//! - `Dataset`: An owned, named collection of rows with its column list
//! - `pattern_match`: Case-insensitive substring matching
//! - `Error`: Error taxonomy shared by every layer
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{Dataset, DatasetId, Row, UserId, Value};
//!
//! let dataset = Dataset::new(
//!     DatasetId::new(1),
//!     UserId::from("ada@example.com"),
//!     "people.csv",
//!     vec!["name".into(), "age".into()],
//!     vec![Row::new(vec![Value::from("Ada"), Value::Int64(36)])],
//! )
//! .unwrap();
//!
//! assert_eq!(dataset.column_index("age"), Some(1));
//! assert_eq!(dataset.rows()[0].get(0), Some(&Value::String("Ada".into())));
//! ```

#![no_std]

extern crate alloc;

mod dataset;
mod error;
pub mod pattern_match;
mod row;
mod value;

pub use dataset::{Dataset, DatasetId, UserId, DATASET_ID_LEN};
pub use error::{Error, Result};
pub use row::Row;
pub use value::Value;
