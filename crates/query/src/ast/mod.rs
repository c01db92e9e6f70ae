//! AST module for query parameters and predicates.

mod predicate;
mod query;

pub use predicate::{ColumnPredicate, CombinedPredicate, Predicate, SearchPredicate};
pub use query::{
    AggregateOp, AggregateQuery, CoercionPolicy, ColumnFilter, ListQuery, RowFilter, SortOrder,
    DEFAULT_LIMIT, MAX_LIMIT,
};
