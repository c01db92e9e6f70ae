//! Query executor module.

mod aggregate;
mod filter;
mod limit;
mod relation;
mod runner;
mod sort;

pub use aggregate::{AggregateExecutor, Group, UNKNOWN_LABEL};
pub use filter::{filter_relation, FilterExecutor};
pub use limit::{LimitExecutor, PageInfo};
pub use relation::Relation;
pub use runner::{aggregate_rows, list_rows, QueryRunner, RowPage};
pub use sort::{sort_relation, SortExecutor, SortMode};
