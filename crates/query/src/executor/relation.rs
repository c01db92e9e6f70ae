//! Relation type for query execution.

use alloc::string::String;
use alloc::vec::Vec;
use tabula_core::{Dataset, Row};

/// A borrowed view over a dataset's rows.
///
/// Executors reorder and drop entries but never copy rows, so a relation is
/// cheap to build straight from a stored dataset.
#[derive(Clone, Debug)]
pub struct Relation<'a> {
    columns: &'a [String],
    pub(crate) rows: Vec<&'a Row>,
}

impl<'a> Relation<'a> {
    /// Creates a relation over `rows` described by `columns`.
    pub fn new(columns: &'a [String], rows: &'a [Row]) -> Self {
        Self {
            columns,
            rows: rows.iter().collect(),
        }
    }

    /// Creates a relation over every row of a dataset, in file order.
    pub fn from_dataset(dataset: &'a Dataset) -> Self {
        Self::new(dataset.columns(), dataset.rows())
    }

    /// Column names in dataset order.
    #[inline]
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[inline]
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<&'a Row> {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Row> + '_ {
        self.rows.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabula_core::{DatasetId, UserId, Value};

    #[test]
    fn test_relation_from_rows() {
        let columns = vec![String::from("a")];
        let rows = vec![Row::new(vec![Value::Int64(1)]), Row::new(vec![Value::Int64(2)])];
        let rel = Relation::new(&columns, &rows);
        assert_eq!(rel.len(), 2);
        assert_eq!(rel.column_index("a"), Some(0));
        assert_eq!(rel.column_index("b"), None);
        assert_eq!(rel.iter().next(), Some(&rows[0]));
    }

    #[test]
    fn test_relation_from_dataset() {
        let ds = Dataset::new(
            DatasetId::new(1),
            UserId::from("ada@example.com"),
            "a.csv",
            vec![String::from("a")],
            vec![Row::new(vec![Value::Int64(1)])],
        )
        .unwrap();
        let rel = Relation::from_dataset(&ds);
        assert_eq!(rel.columns(), ds.columns());
        assert!(core::ptr::eq(rel.rows()[0], &ds.rows()[0]));
    }
}
