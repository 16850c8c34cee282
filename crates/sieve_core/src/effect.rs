use crate::filter::Verdict;
use crate::state::ItemId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (or restart) the extraction latency timer for an item.
    ScheduleFinalize { item: ItemId },
    /// Drop a pending extraction timer.
    CancelFinalize { item: ItemId },
    /// Run the extractor on the item's node and report back with `Msg::RecordExtracted`.
    Extract { item: ItemId },
    ApplyVisibility { item: ItemId, verdict: Verdict },
    /// Restart the advisory debounce timer.
    ScheduleNotification,
}
