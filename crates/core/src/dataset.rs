//! Dataset definitions for Tabula.
//!
//! A dataset is one uploaded file: an ordered column list and the rows in
//! file order, owned by exactly one user.

use crate::error::{Error, Result};
use crate::row::Row;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// Number of hex digits in the textual form of a [`DatasetId`].
pub const DATASET_ID_LEN: usize = 24;

/// Opaque identifier for datasets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetId(u64);

impl DatasetId {
    /// Wraps a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:024x}", self.0)
    }
}

impl FromStr for DatasetId {
    type Err = Error;

    /// Parses the 24 hex digit form. Anything else is reported as a missing
    /// dataset, since a malformed id can never name a stored one.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != DATASET_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::not_found("Dataset", s));
        }
        u64::from_str_radix(s, 16)
            .map(DatasetId)
            .map_err(|_| Error::not_found("Dataset", s))
    }
}

/// Stable identifier of an authenticated user (the account email).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId(value.into())
    }
}

/// A stored dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    id: DatasetId,
    owner: UserId,
    filename: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset, checking that every row spans the column list.
    pub fn new(
        id: DatasetId,
        owner: UserId,
        filename: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Row>,
    ) -> Result<Self> {
        if let Some((pos, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(Error::internal(format!(
                "row {} has {} values but dataset has {} columns",
                pos,
                row.len(),
                columns.len()
            )));
        }
        if rows.is_empty() && !columns.is_empty() {
            // An empty dataset carries no column list.
            return Ok(Self {
                id,
                owner,
                filename: filename.into(),
                columns: Vec::new(),
                rows,
            });
        }
        Ok(Self {
            id,
            owner,
            filename: filename.into(),
            columns,
            rows,
        })
    }

    #[inline]
    pub fn id(&self) -> DatasetId {
        self.id
    }

    #[inline]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns true if `user` owns this dataset.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Column names in first-seen order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the column list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    pub fn set_owner(&mut self, owner: UserId) {
        self.owner = owner;
    }
}
