use std::sync::Arc;

use crate::record::Record;
use crate::settings::Settings;
use crate::state::ItemId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host location changed (initial load or in-page navigation).
    LocationChanged(String),
    /// Feed items seen in one mutation batch or sweep, in document order.
    ItemsObserved(Vec<ItemId>),
    /// Extraction latency elapsed for an item.
    FinalizeDue(ItemId),
    RecordExtracted { item: ItemId, record: Record },
    /// Items whose nodes left the document.
    ItemsRemoved(Vec<ItemId>),
    /// The settings store published a new snapshot.
    SettingsChanged(Arc<Settings>),
    NoOp,
}
