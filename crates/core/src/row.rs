//! Row structure for Tabula.
//!
//! A `Row` holds one record of a dataset. Values are positional: the value at
//! index `i` belongs to the dataset's `i`-th column.

use crate::value::Value;
use alloc::vec::Vec;

/// A row in a dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// Values stored in this row, indexed by column position.
    values: Vec<Value>,
}

impl Row {
    /// Creates a new row from positional values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Creates a row of `width` nulls.
    pub fn nulls(width: usize) -> Self {
        Self {
            values: alloc::vec![Value::Null; width],
        }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Gets a value at the given column index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Gets a value at the given column index, treating out-of-range as null.
    #[inline]
    pub fn get_or_null(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(index).unwrap_or(&NULL)
    }

    /// Sets a value at the given column index.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if index < self.values.len() {
            self.values[index] = value;
            true
        } else {
            false
        }
    }

    /// Returns the number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
