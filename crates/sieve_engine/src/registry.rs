use std::collections::HashMap;

use ego_tree::NodeId;
use sieve_core::ItemId;

/// Maps feed-item nodes to the ids the watcher knows them by. Ids are handed
/// out on first observation and never reused.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    next_id: ItemId,
    by_node: HashMap<NodeId, ItemId>,
    by_item: HashMap<ItemId, NodeId>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_for(&mut self, node: NodeId) -> ItemId {
        if let Some(item) = self.by_node.get(&node) {
            return *item;
        }
        self.next_id += 1;
        let item = self.next_id;
        self.by_node.insert(node, item);
        self.by_item.insert(item, node);
        item
    }

    pub fn lookup(&self, node: NodeId) -> Option<ItemId> {
        self.by_node.get(&node).copied()
    }

    pub fn node(&self, item: ItemId) -> Option<NodeId> {
        self.by_item.get(&item).copied()
    }

    pub fn release(&mut self, node: NodeId) -> Option<ItemId> {
        let item = self.by_node.remove(&node)?;
        self.by_item.remove(&item);
        Some(item)
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}
