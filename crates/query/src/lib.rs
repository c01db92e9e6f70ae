//! Tabula Query - Query engine for uploaded datasets.
//!
//! This crate provides the pure, in-memory query engine:
//!
//! - `ast`: Query parameters (`ListQuery`, `AggregateQuery`) and predicates
//! - `coerce`: Value to text / number conversion shared by every stage
//! - `executor`: Query execution operators (filter, sort, limit, aggregate)
//!   and the `QueryRunner` that composes them
//!
//! # Example
//!
//! ```rust
//! use tabula_core::{Dataset, DatasetId, Row, UserId, Value};
//! use tabula_query::ast::{ListQuery, SortOrder};
//! use tabula_query::executor::QueryRunner;
//!
//! let dataset = Dataset::new(
//!     DatasetId::new(1),
//!     UserId::from("ada@example.com"),
//!     "scores.csv",
//!     vec!["name".into(), "score".into()],
//!     vec![
//!         Row::new(vec![Value::from("Ada"), Value::Int64(7)]),
//!         Row::new(vec![Value::from("Bob"), Value::Int64(3)]),
//!     ],
//! )
//! .unwrap();
//!
//! let query = ListQuery::new(0, 10).unwrap().sort("score", SortOrder::Asc);
//! let page = QueryRunner::new(&dataset).list(&query);
//! assert_eq!(page.info.total_count, 2);
//! assert_eq!(page.rows[0].get(0), Some(&Value::from("Bob")));
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod coerce;
pub mod executor;
