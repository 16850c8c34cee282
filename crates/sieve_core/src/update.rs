use std::sync::Arc;

use crate::record::Record;
use crate::state::{is_detail_view, ItemId, ItemState, WatcherState};
use crate::{Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WatcherState, msg: Msg) -> (WatcherState, Vec<Effect>) {
    let effects = match msg {
        Msg::LocationChanged(location) => {
            state.set_detail_view(is_detail_view(&location));
            Vec::new()
        }
        Msg::ItemsObserved(items) => observe(&mut state, items),
        Msg::FinalizeDue(item) => {
            // The timer may outlive its item; only pending items are extracted.
            if state.item_state(item) == ItemState::Pending {
                vec![Effect::Extract { item }]
            } else {
                Vec::new()
            }
        }
        Msg::RecordExtracted { item, record } => finalize(&mut state, item, record),
        Msg::ItemsRemoved(items) => items
            .into_iter()
            .filter_map(|item| match state.forget(item) {
                ItemState::Pending => Some(Effect::CancelFinalize { item }),
                ItemState::Unprocessed | ItemState::Done => None,
            })
            .collect(),
        Msg::SettingsChanged(settings) => {
            state.replace_settings(settings);
            let mut effects: Vec<Effect> = state
                .done_items()
                .into_iter()
                .filter_map(|item| {
                    let record = state.cached(item)?;
                    Some(Effect::ApplyVisibility {
                        item,
                        verdict: state.decide(record),
                    })
                })
                .collect();
            effects.push(Effect::ScheduleNotification);
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn observe(state: &mut WatcherState, items: Vec<ItemId>) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(items.len() + 1);
    let mut accepted = 0usize;

    for item in items {
        if state.item_state(item) != ItemState::Unprocessed {
            continue;
        }
        // Entering `Pending` here is the only gate against duplicate processing.
        state.set_item_state(item, ItemState::Pending);
        accepted += 1;

        if !state.settings().mode.is_filtering() || state.is_detail_view() {
            state.set_item_state(item, ItemState::Done);
            continue;
        }
        effects.push(Effect::ScheduleFinalize { item });
    }

    if accepted > 0 {
        effects.push(Effect::ScheduleNotification);
    }
    effects
}

fn finalize(state: &mut WatcherState, item: ItemId, record: Record) -> Vec<Effect> {
    if state.item_state(item) != ItemState::Pending {
        return Vec::new();
    }
    let record = Arc::new(record);
    state.cache_mut().insert(item, Arc::clone(&record));
    let verdict = state.decide(&record);
    state.set_item_state(item, ItemState::Done);

    vec![
        Effect::ApplyVisibility { item, verdict },
        Effect::ScheduleNotification,
    ]
}
