//! In-memory dataset store.

use crate::dataset_store::{DatasetStore, NewDataset};
#[cfg(not(feature = "hash-store"))]
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use tabula_core::{Dataset, DatasetId, Error, Result, UserId};

/// Dataset storage backend: HashMap (O(1) lookup) or BTreeMap (O(log n) lookup).
#[cfg(feature = "hash-store")]
type DatasetMap = hashbrown::HashMap<DatasetId, Arc<Dataset>>;
#[cfg(not(feature = "hash-store"))]
type DatasetMap = BTreeMap<DatasetId, Arc<Dataset>>;

/// Stores datasets in memory, keyed by id.
///
/// Ids come from a counter that never goes backwards, so a deleted id is
/// never handed out again and id order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    datasets: DatasetMap,
    next_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            datasets: DatasetMap::default(),
            next_id: 1,
        }
    }

    /// Returns the number of datasets across all owners.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    fn owned_mut(&mut self, id: DatasetId, owner: &UserId) -> Result<&mut Arc<Dataset>> {
        match self.datasets.get_mut(&id) {
            Some(ds) if ds.is_owned_by(owner) => Ok(ds),
            _ => Err(not_found(id)),
        }
    }
}

fn not_found(id: DatasetId) -> Error {
    Error::not_found("Dataset", alloc::format!("{}", id))
}

impl DatasetStore for MemoryStore {
    fn insert(&mut self, owner: &UserId, dataset: NewDataset) -> Result<DatasetId> {
        // `Default` starts the counter at zero; ids begin at one either way.
        let id = DatasetId::new(self.next_id.max(1));
        self.next_id = id
            .raw()
            .checked_add(1)
            .ok_or_else(|| Error::internal("dataset id space exhausted"))?;

        let NewDataset {
            filename,
            columns,
            rows,
        } = dataset;
        let stored = Dataset::new(id, owner.clone(), filename, columns, rows)?;
        self.datasets.insert(id, Arc::new(stored));
        Ok(id)
    }

    fn fetch(&self, id: DatasetId, owner: &UserId) -> Result<Arc<Dataset>> {
        match self.datasets.get(&id) {
            Some(ds) if ds.is_owned_by(owner) => Ok(Arc::clone(ds)),
            _ => Err(not_found(id)),
        }
    }

    fn list(&self, owner: &UserId) -> Vec<Arc<Dataset>> {
        let mut owned: Vec<Arc<Dataset>> = self
            .datasets
            .values()
            .filter(|ds| ds.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by_key(|ds| ds.id());
        owned
    }

    fn rename(&mut self, id: DatasetId, owner: &UserId, filename: &str) -> Result<()> {
        let ds = self.owned_mut(id, owner)?;
        Arc::make_mut(ds).set_filename(filename);
        Ok(())
    }

    fn delete(&mut self, id: DatasetId, owner: &UserId) -> Result<()> {
        self.owned_mut(id, owner)?;
        self.datasets.remove(&id);
        Ok(())
    }

    fn reassign_owner(&mut self, from: &UserId, to: &UserId) -> usize {
        let mut moved = 0;
        for ds in self.datasets.values_mut() {
            if ds.is_owned_by(from) {
                Arc::make_mut(ds).set_owner(to.clone());
                moved += 1;
            }
        }
        moved
    }
}
