use std::sync::{Arc, Once};

use pretty_assertions::assert_eq;
use sieve_core::{
    advise, update, Advisory, Effect, Engagement, HideRule, ItemState, Media, Mode, Msg, Record,
    Settings, Tally, Verdict, WatcherState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sieve_logging::initialize_for_tests);
}

fn video_only() -> Arc<Settings> {
    Arc::new(Settings {
        show_only_video: true,
        ..Settings::default()
    })
}

fn image_record() -> Record {
    Record::new("a photo", Media::Image, Engagement::default())
}

fn finish(state: WatcherState, item: u64, record: Record) -> (WatcherState, Vec<Effect>) {
    let (state, effects) = update(state, Msg::FinalizeDue(item));
    assert_eq!(effects, vec![Effect::Extract { item }]);
    update(state, Msg::RecordExtracted { item, record })
}

#[test]
fn observed_items_become_pending_and_schedule_extraction() {
    init_logging();
    let state = WatcherState::new(video_only());

    let (state, effects) = update(state, Msg::ItemsObserved(vec![1, 2]));

    assert_eq!(state.item_state(1), ItemState::Pending);
    assert_eq!(state.item_state(2), ItemState::Pending);
    assert_eq!(
        effects,
        vec![
            Effect::ScheduleFinalize { item: 1 },
            Effect::ScheduleFinalize { item: 2 },
            Effect::ScheduleNotification,
        ]
    );
}

#[test]
fn duplicate_observation_is_processed_once() {
    init_logging();
    let state = WatcherState::new(video_only());

    let (state, first) = update(state, Msg::ItemsObserved(vec![4, 4]));
    assert_eq!(
        first,
        vec![Effect::ScheduleFinalize { item: 4 }, Effect::ScheduleNotification]
    );

    let (state, second) = update(state, Msg::ItemsObserved(vec![4]));
    assert!(second.is_empty());

    let (state, effects) = finish(state, 4, image_record());
    assert_eq!(
        effects,
        vec![
            Effect::ApplyVisibility {
                item: 4,
                verdict: Verdict::Hide(HideRule::Media),
            },
            Effect::ScheduleNotification,
        ]
    );

    // A stray timer or a second extraction result changes nothing.
    let (state, stray) = update(state, Msg::FinalizeDue(4));
    assert!(stray.is_empty());
    let (state, late) = update(
        state,
        Msg::RecordExtracted {
            item: 4,
            record: image_record(),
        },
    );
    assert!(late.is_empty());
    assert_eq!(state.summary().done, 1);
    assert_eq!(state.summary().cached, 1);
}

#[test]
fn original_mode_short_circuits_to_done() {
    init_logging();
    let settings = Arc::new(Settings {
        mode: Mode::Original,
        ..Settings::default()
    });
    let (state, effects) = update(WatcherState::new(settings), Msg::ItemsObserved(vec![9]));

    assert_eq!(state.item_state(9), ItemState::Done);
    assert!(state.cached(9).is_none());
    assert_eq!(effects, vec![Effect::ScheduleNotification]);
}

#[test]
fn detail_view_short_circuits_to_done() {
    init_logging();
    let state = WatcherState::new(video_only());
    let (state, _) = update(
        state,
        Msg::LocationChanged("https://x.com/someone/status/42".to_string()),
    );
    assert!(state.is_detail_view());

    let (state, effects) = update(state, Msg::ItemsObserved(vec![1]));
    assert_eq!(state.item_state(1), ItemState::Done);
    assert_eq!(effects, vec![Effect::ScheduleNotification]);

    let (state, _) = update(state, Msg::LocationChanged("https://x.com/home".to_string()));
    let (_, effects) = update(state, Msg::ItemsObserved(vec![2]));
    assert_eq!(
        effects,
        vec![Effect::ScheduleFinalize { item: 2 }, Effect::ScheduleNotification]
    );
}

#[test]
fn settings_change_reuses_cached_records() {
    init_logging();
    let state = WatcherState::new(video_only());
    let (state, _) = update(state, Msg::ItemsObserved(vec![1, 2, 3]));
    let (state, _) = finish(state, 1, image_record());
    let (state, _) = finish(
        state,
        2,
        Record::new("clip", Media::Video, Engagement::default()),
    );
    // Item 3 is still pending and has no record yet.

    let relaxed = Arc::new(Settings::default());
    let (state, effects) = update(state, Msg::SettingsChanged(relaxed.clone()));

    assert_eq!(
        effects,
        vec![
            Effect::ApplyVisibility {
                item: 1,
                verdict: Verdict::Show,
            },
            Effect::ApplyVisibility {
                item: 2,
                verdict: Verdict::Show,
            },
            Effect::ScheduleNotification,
        ]
    );
    assert_eq!(state.settings(), &relaxed);
    assert_eq!(state.item_state(1), ItemState::Done);
    assert_eq!(state.item_state(3), ItemState::Pending);
}

#[test]
fn switching_to_original_still_filters_cached_records() {
    init_logging();
    let state = WatcherState::new(video_only());
    let (state, _) = update(state, Msg::ItemsObserved(vec![1]));
    let (state, _) = finish(state, 1, image_record());

    let original = Arc::new(Settings {
        mode: Mode::Original,
        show_only_video: true,
        ..Settings::default()
    });
    let (state, effects) = update(state, Msg::SettingsChanged(original));
    assert_eq!(
        effects,
        vec![
            Effect::ApplyVisibility {
                item: 1,
                verdict: Verdict::Hide(HideRule::Media),
            },
            Effect::ScheduleNotification,
        ]
    );

    // New items are still left alone in original mode.
    let (state, effects) = update(state, Msg::ItemsObserved(vec![2]));
    assert_eq!(state.item_state(2), ItemState::Done);
    assert_eq!(effects, vec![Effect::ScheduleNotification]);
}

#[test]
fn removal_forgets_state_and_cancels_pending_timers() {
    init_logging();
    let state = WatcherState::new(video_only());
    let (state, _) = update(state, Msg::ItemsObserved(vec![1, 2]));
    let (state, _) = finish(state, 1, image_record());

    let (state, effects) = update(state, Msg::ItemsRemoved(vec![1, 2, 99]));

    assert_eq!(effects, vec![Effect::CancelFinalize { item: 2 }]);
    assert_eq!(state.item_state(1), ItemState::Unprocessed);
    assert!(state.cached(1).is_none());
    assert_eq!(state.summary().cached, 0);
}

#[test]
fn noop_leaves_state_untouched() {
    let state = WatcherState::new(video_only());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn advisory_thresholds() {
    init_logging();
    assert_eq!(advise(Tally { done: 25, shown: 0 }), Advisory::Show);
    assert_eq!(advise(Tally { done: 25, shown: 1 }), Advisory::Hide);
    assert_eq!(advise(Tally { done: 15, shown: 0 }), Advisory::Hide);
    assert_eq!(advise(Tally { done: 20, shown: 0 }), Advisory::Hide);
    assert_eq!(Tally { done: 25, shown: 1 }.hidden(), 24);
}
