//! Sort executor.

use crate::ast::SortOrder;
use crate::coerce::{cmp_f64, render, to_number};
use crate::executor::Relation;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tabula_core::Row;

/// How a sort compared its keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    /// Every value in the column parsed as a number.
    Numeric,
    /// At least one value did not; the column was compared as lowercase text.
    Lexical,
}

/// Sort executor - stable sort on a single column.
///
/// The column is first read as numbers. If any row fails to convert, the
/// whole column falls back to case-folded text; the choice is made once per
/// execution, never per row.
pub struct SortExecutor {
    column: usize,
    order: SortOrder,
}

impl SortExecutor {
    /// Creates a new sort executor on the column at `column`.
    pub fn new(column: usize, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Resolves `name` against a column list. Returns `None` for an empty or
    /// unknown column, in which case the caller leaves the input order alone.
    pub fn for_column(columns: &[String], name: &str, order: SortOrder) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        columns
            .iter()
            .position(|c| c == name)
            .map(|idx| Self::new(idx, order))
    }

    /// Executes the sort on the input relation.
    pub fn execute<'a>(&self, input: Relation<'a>) -> (Relation<'a>, SortMode) {
        let mut input = input;
        let numeric: Option<Vec<f64>> = input
            .rows
            .iter()
            .map(|row| to_number(row.get_or_null(self.column)))
            .collect();

        let mode = match numeric {
            Some(keys) => {
                input.rows = self.reorder(input.rows, keys, |a, b| cmp_f64(*a, *b));
                SortMode::Numeric
            }
            None => {
                let keys: Vec<String> = input
                    .rows
                    .iter()
                    .map(|row| render(row.get_or_null(self.column)).to_lowercase())
                    .collect();
                input.rows = self.reorder(input.rows, keys, |a, b| a.cmp(b));
                SortMode::Lexical
            }
        };
        (input, mode)
    }

    fn reorder<'a, K, F>(&self, rows: Vec<&'a Row>, keys: Vec<K>, cmp: F) -> Vec<&'a Row>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let mut keyed: Vec<(K, &'a Row)> = keys.into_iter().zip(rows).collect();
        // `sort_by` is stable; reversing the comparator (not the output) keeps
        // equal keys in input order for descending sorts too.
        match self.order {
            SortOrder::Asc => keyed.sort_by(|a, b| cmp(&a.0, &b.0)),
            SortOrder::Desc => keyed.sort_by(|a, b| cmp(&b.0, &a.0)),
        }
        keyed.into_iter().map(|(_, row)| row).collect()
    }
}

/// Sorts a relation by the named column. Unknown or empty names leave the
/// input order unchanged and report no mode.
pub fn sort_relation<'a>(
    input: Relation<'a>,
    column: Option<&str>,
    order: SortOrder,
) -> (Relation<'a>, Option<SortMode>) {
    let executor = match column.and_then(|c| SortExecutor::for_column(input.columns(), c, order)) {
        Some(executor) => executor,
        None => return (input, None),
    };
    let (output, mode) = executor.execute(input);
    (output, Some(mode))
}
