use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use ego_tree::NodeId;
use serde::{Deserialize, Serialize};
use sieve_core::{
    advise, update, Advisory, Effect, ItemId, ItemState, Msg, Record, Settings, Tally, Verdict,
    WatcherState, WatcherSummary,
};
use sieve_logging::{sieve_debug, sieve_info, sieve_trace, sieve_warn};

use crate::banner::{banner_visible, hide_banner, show_banner};
use crate::document::{Document, Mutation};
use crate::extract::{Extractor, FeedItemExtractor};
use crate::markup::FeedMarkup;
use crate::registry::ItemRegistry;
use crate::timer::TimerQueue;
use crate::visibility::{apply_visibility, is_hidden};

/// Fixed latencies of the pipeline, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Delay before sweeping items already on the page at startup.
    pub initial_sweep_ms: u64,
    /// Wait after first sight of an item so lazily loaded media can attach.
    pub extraction_delay_ms: u64,
    /// Quiet period before the advisory is re-evaluated.
    pub notification_debounce_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            initial_sweep_ms: 500,
            extraction_delay_ms: 300,
            notification_debounce_ms: 1_000,
        }
    }
}

impl PipelineConfig {
    fn initial_sweep(&self) -> Duration {
        Duration::from_millis(self.initial_sweep_ms)
    }

    fn extraction_delay(&self) -> Duration {
        Duration::from_millis(self.extraction_delay_ms)
    }

    fn notification_debounce(&self) -> Duration {
        Duration::from_millis(self.notification_debounce_ms)
    }
}

/// Namespace carried by a settings-store change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Sync,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKey {
    InitialSweep,
    Finalize(ItemId),
    Notification,
}

/// Snapshot of one feed item for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Absent for items the watcher has not seen yet.
    pub item: Option<ItemId>,
    pub state: ItemState,
    pub hidden: bool,
    /// Present once the item has been extracted.
    pub record: Option<Arc<Record>>,
    pub verdict: Option<Verdict>,
}

/// Single-threaded reactor driving feed items from first sight to a visibility
/// decision.
///
/// Every entry point runs to completion before returning. Structural changes
/// go through [`Pipeline::mutate`], which delivers the resulting mutation
/// records to the watcher in the same call; timers run on a virtual clock that
/// only moves in [`Pipeline::advance`] and friends.
pub struct Pipeline {
    document: Document,
    markup: FeedMarkup,
    extractor: Box<dyn Extractor>,
    config: PipelineConfig,
    state: WatcherState,
    registry: ItemRegistry,
    timers: TimerQueue<TimerKey>,
    now: Duration,
    started: bool,
}

impl Pipeline {
    pub fn new(
        document: Document,
        settings: Arc<Settings>,
        markup: FeedMarkup,
        config: PipelineConfig,
    ) -> Self {
        let extractor = Box::new(FeedItemExtractor::new(markup.clone()));
        Self {
            document,
            markup,
            extractor,
            config,
            state: WatcherState::new(settings),
            registry: ItemRegistry::new(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            started: false,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Begins observing: records the location and arms the initial sweep.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let location = self.document.location().to_string();
        sieve_info!("Pipeline started at {}", location);
        self.dispatch(Msg::LocationChanged(location));
        // Changes made before start are covered by the sweep.
        self.document.take_mutations();
        self.timers
            .schedule(TimerKey::InitialSweep, self.now + self.config.initial_sweep());
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &Arc<Settings> {
        self.state.settings()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn summary(&self) -> WatcherSummary {
        self.state.summary()
    }

    pub fn item_state(&self, node: NodeId) -> ItemState {
        self.registry
            .lookup(node)
            .map(|item| self.state.item_state(item))
            .unwrap_or_default()
    }

    pub fn item_id(&self, node: NodeId) -> Option<ItemId> {
        self.registry.lookup(node)
    }

    pub fn banner_visible(&self) -> bool {
        banner_visible(&self.document)
    }

    /// Applies a change to the host document and delivers its mutation records.
    pub fn mutate<R>(&mut self, change: impl FnOnce(&mut Document) -> R) -> R {
        let result = change(&mut self.document);
        self.flush_mutations();
        result
    }

    /// Observation callback for added subtree roots. Delivering the same node
    /// more than once is harmless.
    pub fn observe_added(&mut self, roots: &[NodeId]) {
        let mut items = Vec::new();
        for root in roots {
            if !self.document.is_attached(*root) {
                continue;
            }
            for node in self.document.select_within(*root, &self.markup.feed_item) {
                items.push(self.registry.id_for(node));
            }
        }
        if items.is_empty() {
            return;
        }
        sieve_trace!("Observed {} feed item(s)", items.len());
        self.dispatch(Msg::ItemsObserved(items));
    }

    pub fn settings_changed(&mut self, settings: Arc<Settings>) {
        sieve_info!("Settings changed, mode={:?}", settings.mode);
        self.dispatch(Msg::SettingsChanged(settings));
    }

    /// Store change notification; only the sync area carries filter settings.
    pub fn storage_changed(&mut self, area: StorageArea, settings: Arc<Settings>) -> bool {
        if area != StorageArea::Sync {
            sieve_trace!("Ignoring {:?} storage change", area);
            return false;
        }
        self.settings_changed(settings);
        true
    }

    /// Removes the advisory on display. It only returns after a new
    /// qualifying event. Without a banner on the page this does nothing.
    pub fn dismiss_banner(&mut self) -> bool {
        let dismissed = self.mutate(hide_banner);
        if dismissed {
            self.timers.cancel(TimerKey::Notification);
        }
        dismissed
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.now + by);
    }

    /// Fires every timer due up to `target`, in deadline order, moving the
    /// clock to each deadline before firing.
    pub fn advance_to(&mut self, target: Duration) {
        while let Some((key, at)) = self.timers.pop_due(target) {
            self.set_clock(at.max(self.now));
            self.fire(key);
        }
        self.set_clock(target.max(self.now));
    }

    /// Runs timers until none are armed and returns the final clock.
    pub fn run_until_idle(&mut self) -> Duration {
        while let Some(deadline) = self.timers.next_deadline() {
            self.advance_to(deadline);
        }
        self.now
    }

    /// Every feed item currently in the document, in document order.
    pub fn report(&self) -> Vec<ItemReport> {
        self.document
            .select(&self.markup.feed_item)
            .into_iter()
            .map(|node| {
                let item = self.registry.lookup(node);
                let record = item.and_then(|item| self.state.cached(item).cloned());
                ItemReport {
                    item,
                    state: self.item_state(node),
                    hidden: is_hidden(&self.document, node),
                    verdict: record.as_ref().map(|r| self.state.decide(r)),
                    record,
                }
            })
            .collect()
    }

    fn set_clock(&mut self, now: Duration) {
        self.now = now;
        sieve_logging::set_virtual_millis(now.as_millis() as u64);
    }

    fn flush_mutations(&mut self) {
        for mutation in self.document.take_mutations() {
            match mutation {
                Mutation::Added(roots) => {
                    if self.started {
                        self.observe_added(&roots);
                    }
                }
                Mutation::Removed(roots) => self.observe_removed(&roots),
                Mutation::Navigated(location) => self.dispatch(Msg::LocationChanged(location)),
            }
        }
    }

    fn observe_removed(&mut self, roots: &[NodeId]) {
        let items: Vec<ItemId> = roots
            .iter()
            .flat_map(|root| self.document.select_within(*root, &self.markup.feed_item))
            .filter_map(|node| self.registry.release(node))
            .collect();
        if !items.is_empty() {
            sieve_debug!("{} feed item(s) left the document", items.len());
            self.dispatch(Msg::ItemsRemoved(items));
        }
    }

    fn fire(&mut self, key: TimerKey) {
        match key {
            TimerKey::InitialSweep => {
                let items: Vec<ItemId> = self
                    .document
                    .select(&self.markup.feed_item)
                    .into_iter()
                    .map(|node| self.registry.id_for(node))
                    .collect();
                sieve_info!("Initial sweep found {} feed item(s)", items.len());
                self.dispatch(Msg::ItemsObserved(items));
                self.schedule_notification();
            }
            TimerKey::Finalize(item) => self.dispatch(Msg::FinalizeDue(item)),
            TimerKey::Notification => self.update_advisory(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    inbox.push_back(follow_up);
                }
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::ScheduleFinalize { item } => {
                self.timers
                    .schedule(TimerKey::Finalize(item), self.now + self.config.extraction_delay());
                None
            }
            Effect::CancelFinalize { item } => {
                self.timers.cancel(TimerKey::Finalize(item));
                None
            }
            Effect::Extract { item } => {
                let element = self
                    .registry
                    .node(item)
                    .and_then(|node| self.document.element(node));
                match element {
                    Some(element) => Some(Msg::RecordExtracted {
                        item,
                        record: self.extractor.extract(element),
                    }),
                    None => {
                        sieve_warn!("Item {} has no node to extract from", item);
                        Some(Msg::ItemsRemoved(vec![item]))
                    }
                }
            }
            Effect::ApplyVisibility { item, verdict } => {
                let Some(node) = self.registry.node(item) else {
                    return None;
                };
                sieve_debug!("Item {} -> {:?}", item, verdict);
                apply_visibility(&mut self.document, node, verdict.is_hidden());
                None
            }
            Effect::ScheduleNotification => {
                self.schedule_notification();
                None
            }
        }
    }

    fn schedule_notification(&mut self) {
        self.timers.schedule(
            TimerKey::Notification,
            self.now + self.config.notification_debounce(),
        );
    }

    fn update_advisory(&mut self) {
        let done = self.state.done_items();
        let shown = done
            .iter()
            .filter_map(|item| self.registry.node(*item))
            .filter(|node| !is_hidden(&self.document, *node))
            .count();
        let tally = Tally {
            done: done.len(),
            shown,
        };
        match advise(tally) {
            Advisory::Show => {
                if self.mutate(show_banner) {
                    sieve_info!(
                        "All {} processed items are hidden; showing advisory",
                        tally.done
                    );
                }
            }
            Advisory::Hide => {
                if self.mutate(hide_banner) {
                    sieve_debug!("Advisory removed ({} of {} hidden)", tally.hidden(), tally.done);
                }
            }
        }
    }
}
