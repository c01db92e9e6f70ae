//! Predicate definitions for row filtering.

use crate::coerce::render;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::pattern_match::{contains_folded, fold};
use tabula_core::Row;

/// A predicate that can be evaluated against rows.
pub trait Predicate {
    /// Evaluates the predicate against a row.
    fn eval(&self, row: &Row) -> bool;
}

/// Matches rows where any cell contains the search term, ignoring case.
#[derive(Clone, Debug)]
pub struct SearchPredicate {
    needle: String,
}

impl SearchPredicate {
    pub fn new(term: &str) -> Self {
        Self { needle: fold(term) }
    }
}

impl Predicate for SearchPredicate {
    fn eval(&self, row: &Row) -> bool {
        row.values()
            .iter()
            .any(|v| contains_folded(&render(v), &self.needle))
    }
}

/// Matches rows where one column contains the filter value, ignoring case.
///
/// `index` is `None` when the column is not part of the dataset; every cell
/// then reads as the empty string.
#[derive(Clone, Debug)]
pub struct ColumnPredicate {
    index: Option<usize>,
    needle: String,
}

impl ColumnPredicate {
    pub fn new(index: Option<usize>, value: &str) -> Self {
        Self {
            index,
            needle: fold(value),
        }
    }
}

impl Predicate for ColumnPredicate {
    fn eval(&self, row: &Row) -> bool {
        match self.index {
            Some(idx) => contains_folded(&render(row.get_or_null(idx)), &self.needle),
            None => self.needle.is_empty(),
        }
    }
}

/// Conjunction of predicates. An empty conjunction accepts every row.
pub struct CombinedPredicate {
    children: Vec<Box<dyn Predicate>>,
}

impl CombinedPredicate {
    pub fn and(children: Vec<Box<dyn Predicate>>) -> Self {
        Self { children }
    }

    /// True when there is nothing to evaluate.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Predicate for CombinedPredicate {
    fn eval(&self, row: &Row) -> bool {
        self.children.iter().all(|c| c.eval(row))
    }
}

impl core::fmt::Debug for CombinedPredicate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CombinedPredicate(and, {} children)", self.children.len())
    }
}
