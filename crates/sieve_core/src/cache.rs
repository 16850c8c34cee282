use std::collections::HashMap;
use std::sync::Arc;

use crate::record::Record;
use crate::state::ItemId;

/// Extracted records keyed by item id.
///
/// An entry is written once, when its item finishes processing, and removed
/// when the item leaves the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordCache {
    entries: HashMap<ItemId, Arc<Record>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record unless one is already present. Returns whether it was stored.
    pub fn insert(&mut self, item: ItemId, record: Arc<Record>) -> bool {
        if self.entries.contains_key(&item) {
            return false;
        }
        self.entries.insert(item, record);
        true
    }

    pub fn get(&self, item: ItemId) -> Option<&Arc<Record>> {
        self.entries.get(&item)
    }

    pub fn remove(&mut self, item: ItemId) -> Option<Arc<Record>> {
        self.entries.remove(&item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
