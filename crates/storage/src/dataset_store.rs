//! Dataset store abstraction.
//!
//! Every lookup is scoped by owner. A dataset that exists but belongs to
//! another user is reported exactly like one that does not exist.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabula_core::{Dataset, DatasetId, Result, Row, UserId};

/// A dataset ready to be stored, before it has an id or an owner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewDataset {
    pub filename: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl NewDataset {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Persistence collaborator for datasets.
pub trait DatasetStore {
    /// Stores a dataset for `owner` and returns its new id.
    fn insert(&mut self, owner: &UserId, dataset: NewDataset) -> Result<DatasetId>;

    /// Fetches a dataset. `NotFound` when absent or owned by someone else.
    fn fetch(&self, id: DatasetId, owner: &UserId) -> Result<Arc<Dataset>>;

    /// Lists the datasets owned by `owner`, oldest first.
    fn list(&self, owner: &UserId) -> Vec<Arc<Dataset>>;

    /// Changes the filename of a dataset.
    fn rename(&mut self, id: DatasetId, owner: &UserId, filename: &str) -> Result<()>;

    /// Removes a dataset.
    fn delete(&mut self, id: DatasetId, owner: &UserId) -> Result<()>;

    /// Moves every dataset owned by `from` to `to`, returning how many moved.
    fn reassign_owner(&mut self, from: &UserId, to: &UserId) -> usize;
}
