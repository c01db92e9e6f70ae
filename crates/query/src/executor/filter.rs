//! Filter executor.

use crate::ast::{Predicate, RowFilter};
use crate::executor::Relation;

/// Filter executor - keeps the rows accepted by a predicate, in order.
pub struct FilterExecutor<P: Predicate> {
    predicate: P,
}

impl<P: Predicate> FilterExecutor<P> {
    /// Creates a new filter executor.
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Executes the filter on the input relation.
    pub fn execute<'a>(&self, mut input: Relation<'a>) -> Relation<'a> {
        input.rows.retain(|row| self.predicate.eval(row));
        input
    }
}

/// Applies search and column filter to a relation.
///
/// With neither set the input is returned untouched.
pub fn filter_relation<'a>(input: Relation<'a>, filter: &RowFilter) -> Relation<'a> {
    if filter.is_identity() {
        return input;
    }
    let predicate = filter.bind(input.columns());
    if predicate.is_empty() {
        return input;
    }
    FilterExecutor::new(predicate).execute(input)
}
