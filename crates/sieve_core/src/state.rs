use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::cache::RecordCache;
use crate::filter::{evaluate, Verdict};
use crate::record::Record;
use crate::settings::Settings;

/// Identifier assigned to a feed-item node when it is first observed.
pub type ItemId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Unprocessed,
    Pending,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatcherSummary {
    pub pending: usize,
    pub done: usize,
    pub cached: usize,
}

/// Item watcher state: per-item processing state, the record cache and the
/// current settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatcherState {
    settings: Arc<Settings>,
    items: HashMap<ItemId, ItemState>,
    cache: RecordCache,
    detail_view: bool,
}

impl WatcherState {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub(crate) fn replace_settings(&mut self, settings: Arc<Settings>) {
        self.settings = settings;
    }

    /// Items never seen (or already forgotten) report `Unprocessed`.
    pub fn item_state(&self, item: ItemId) -> ItemState {
        self.items.get(&item).copied().unwrap_or_default()
    }

    pub(crate) fn set_item_state(&mut self, item: ItemId, state: ItemState) {
        self.items.insert(item, state);
    }

    /// Drops everything known about an item and returns the state it was in.
    pub(crate) fn forget(&mut self, item: ItemId) -> ItemState {
        self.cache.remove(item);
        self.items.remove(&item).unwrap_or_default()
    }

    pub fn cached(&self, item: ItemId) -> Option<&Arc<Record>> {
        self.cache.get(item)
    }

    pub(crate) fn cache_mut(&mut self) -> &mut RecordCache {
        &mut self.cache
    }

    /// Finished items in ascending id order.
    pub fn done_items(&self) -> Vec<ItemId> {
        let mut done: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(_, state)| **state == ItemState::Done)
            .map(|(item, _)| *item)
            .collect();
        done.sort_unstable();
        done
    }

    /// Filter decision under the current snapshot. The mode only gates new
    /// items at first observation; it does not enter the decision.
    pub fn decide(&self, record: &Record) -> Verdict {
        evaluate(record, &self.settings)
    }

    pub fn is_detail_view(&self) -> bool {
        self.detail_view
    }

    pub(crate) fn set_detail_view(&mut self, detail_view: bool) {
        self.detail_view = detail_view;
    }

    pub fn summary(&self) -> WatcherSummary {
        let count = |wanted: ItemState| self.items.values().filter(|s| **s == wanted).count();
        WatcherSummary {
            pending: count(ItemState::Pending),
            done: count(ItemState::Done),
            cached: self.cache.len(),
        }
    }
}

/// Single-item pages (`…/status/…`) are never filtered.
pub fn is_detail_view(location: &str) -> bool {
    match Url::parse(location) {
        Ok(url) => url.path().contains("/status/"),
        Err(_) => location.contains("/status/"),
    }
}
