//! Query runner.
//!
//! Wires the executors into the two request paths:
//!
//! - listing: filter -> sort -> limit
//! - analytics: filter -> aggregate
//!
//! Both paths share the same filter stage, so a search or column filter
//! selects the same rows whether they are listed or aggregated.

use crate::ast::{AggregateQuery, ListQuery};
use crate::executor::aggregate::{AggregateExecutor, Group};
use crate::executor::filter::filter_relation;
use crate::executor::limit::{LimitExecutor, PageInfo};
use crate::executor::sort::{sort_relation, SortMode};
use crate::executor::Relation;
use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::{Dataset, Result, Row};

/// One page of a listing, borrowing rows from the dataset.
#[derive(Clone, Debug)]
pub struct RowPage<'a> {
    pub columns: &'a [String],
    pub rows: Vec<&'a Row>,
    pub info: PageInfo,
    /// How the sort column was compared, if a sort ran.
    pub sort_mode: Option<SortMode>,
}

/// Executes queries against a single dataset.
pub struct QueryRunner<'a> {
    columns: &'a [String],
    rows: &'a [Row],
}

impl<'a> QueryRunner<'a> {
    /// Creates a runner over a stored dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            columns: dataset.columns(),
            rows: dataset.rows(),
        }
    }

    /// Creates a runner over loose rows described by `columns`.
    pub fn from_parts(columns: &'a [String], rows: &'a [Row]) -> Self {
        Self { columns, rows }
    }

    fn relation(&self) -> Relation<'a> {
        Relation::new(self.columns, self.rows)
    }

    /// Runs the listing path.
    pub fn list(&self, query: &ListQuery) -> RowPage<'a> {
        let filtered = filter_relation(self.relation(), &query.filter);
        let (sorted, sort_mode) =
            sort_relation(filtered, query.sort_by.as_deref(), query.sort_order);
        let (page, info) = LimitExecutor::new(query.limit, query.skip).execute(sorted);

        RowPage {
            columns: self.columns,
            rows: page.into_rows(),
            info,
            sort_mode,
        }
    }

    /// Runs the analytics path.
    ///
    /// Fails with `InvalidArgument` when the operation needs a value column
    /// and none was given, even if there are no rows to aggregate.
    pub fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<Group>> {
        let value_column = query.value_column()?;
        let filtered = filter_relation(self.relation(), &query.filter);

        let group_by = filtered.column_index(&query.group_by);
        let column = value_column.and_then(|c| filtered.column_index(c));
        let executor =
            AggregateExecutor::new(group_by, query.operation, column).with_policy(query.policy);
        Ok(executor.execute(&filtered))
    }
}

/// Runs the listing path over a dataset.
pub fn list_rows<'a>(dataset: &'a Dataset, query: &ListQuery) -> RowPage<'a> {
    QueryRunner::new(dataset).list(query)
}

/// Runs the analytics path over a dataset.
pub fn aggregate_rows(dataset: &Dataset, query: &AggregateQuery) -> Result<Vec<Group>> {
    QueryRunner::new(dataset).aggregate(query)
}
