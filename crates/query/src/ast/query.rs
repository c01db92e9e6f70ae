//! Request-scoped query parameters.
//!
//! These types are validated once at construction; the executors trust them.

use super::predicate::{ColumnPredicate, CombinedPredicate, SearchPredicate};
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use tabula_core::{Error, Result};

/// Page size used when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 10;
/// Largest accepted page size.
pub const MAX_LIMIT: usize = 100;

/// Sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(Error::invalid_argument(format!(
                "sort_order must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

/// Aggregate operation applied to each group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AggregateOp {
    #[default]
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Count => "count",
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }

    /// Every operation except `count` reduces a value column.
    pub fn needs_column(&self) -> bool {
        !matches!(self, AggregateOp::Count)
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "count" => Ok(AggregateOp::Count),
            "sum" => Ok(AggregateOp::Sum),
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(Error::invalid_argument(format!(
                "operation must be one of count, sum, avg, min, max, got '{}'",
                other
            ))),
        }
    }
}

/// What happens to a group when one of its values is not numeric.
///
/// `ZeroGroup` is how the service originally behaved; deployments that depend
/// on it opt in through `aggregate_coercion = "zero_group"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoercionPolicy {
    /// The offending value counts as 0; the rest of the group is reduced.
    #[default]
    ZeroRow,
    /// The whole group reports 0.
    ZeroGroup,
}

impl FromStr for CoercionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zero_row" => Ok(CoercionPolicy::ZeroRow),
            "zero_group" => Ok(CoercionPolicy::ZeroGroup),
            other => Err(Error::invalid_argument(format!(
                "unknown coercion policy '{}'",
                other
            ))),
        }
    }
}

/// Substring filter on a single column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Search term and column filter shared by the listing and analytics paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub search: Option<String>,
    pub filter: Option<ColumnFilter>,
}

impl RowFilter {
    /// Builds a filter from optional request parameters. Empty strings are
    /// treated as absent; a column filter needs both halves.
    pub fn from_parts(
        search: Option<String>,
        filter_column: Option<String>,
        filter_value: Option<String>,
    ) -> Self {
        let search = search.filter(|s| !s.is_empty());
        let filter = match (filter_column, filter_value) {
            (Some(c), Some(v)) if !c.is_empty() && !v.is_empty() => Some(ColumnFilter::new(c, v)),
            _ => None,
        };
        Self { search, filter }
    }

    /// True when no predicate would be applied.
    pub fn is_identity(&self) -> bool {
        self.search.is_none() && self.filter.is_none()
    }

    /// Binds the filter to a column list, producing an executable predicate.
    /// Search runs before the column filter.
    pub fn bind(&self, columns: &[String]) -> CombinedPredicate {
        let mut children: Vec<Box<dyn super::Predicate>> = Vec::new();
        if let Some(term) = self.search.as_deref().filter(|s| !s.is_empty()) {
            children.push(Box::new(SearchPredicate::new(term)));
        }
        if let Some(f) = &self.filter {
            if !f.column.is_empty() && !f.value.is_empty() {
                let index = columns.iter().position(|c| c == &f.column);
                children.push(Box::new(ColumnPredicate::new(index, &f.value)));
            }
        }
        CombinedPredicate::and(children)
    }
}

/// Parameters of the row listing path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub skip: usize,
    pub limit: usize,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub filter: RowFilter,
}

impl ListQuery {
    /// Creates a listing query, validating `skip >= 0` and
    /// `1 <= limit <= MAX_LIMIT`.
    pub fn new(skip: i64, limit: i64) -> Result<Self> {
        Self::bounded(skip, limit, MAX_LIMIT)
    }

    /// Like [`ListQuery::new`] with a caller-chosen upper bound on `limit`.
    pub fn bounded(skip: i64, limit: i64, max_limit: usize) -> Result<Self> {
        if skip < 0 {
            return Err(Error::invalid_argument(format!(
                "skip must be greater than or equal to 0, got {}",
                skip
            )));
        }
        if limit < 1 || limit as u64 > max_limit as u64 {
            return Err(Error::invalid_argument(format!(
                "limit must be between 1 and {}, got {}",
                max_limit, limit
            )));
        }
        Ok(Self {
            skip: skip as usize,
            limit: limit as usize,
            sort_by: None,
            sort_order: SortOrder::Asc,
            filter: RowFilter::default(),
        })
    }

    pub fn sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(column.into());
        self.sort_order = order;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.filter.search = Some(term.into());
        self
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.filter = Some(ColumnFilter::new(column, value));
        self
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            sort_by: None,
            sort_order: SortOrder::Asc,
            filter: RowFilter::default(),
        }
    }
}

/// Parameters of the analytics path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateQuery {
    pub group_by: String,
    pub aggregate_column: Option<String>,
    pub operation: AggregateOp,
    pub policy: CoercionPolicy,
    pub filter: RowFilter,
}

impl AggregateQuery {
    /// Creates a `count` query grouped by `group_by`.
    pub fn new(group_by: impl Into<String>) -> Result<Self> {
        let group_by = group_by.into();
        if group_by.is_empty() {
            return Err(Error::invalid_argument("group_by is required"));
        }
        Ok(Self {
            group_by,
            aggregate_column: None,
            operation: AggregateOp::Count,
            policy: CoercionPolicy::default(),
            filter: RowFilter::default(),
        })
    }

    pub fn operation(mut self, op: AggregateOp) -> Self {
        self.operation = op;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.aggregate_column = Some(column.into());
        self
    }

    pub fn policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the value column, failing when the operation needs one and
    /// none was given.
    pub fn value_column(&self) -> Result<Option<&str>> {
        let column = self.aggregate_column.as_deref().filter(|c| !c.is_empty());
        if self.operation.needs_column() && column.is_none() {
            return Err(Error::invalid_argument(format!(
                "aggregate_column required for {}",
                self.operation
            )));
        }
        Ok(column)
    }
}
