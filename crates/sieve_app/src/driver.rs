//! Runs a [`Pipeline`] against the wall clock.
//!
//! The pipeline's virtual clock tracks time elapsed since [`run`] began. Scroll
//! fragments are appended to the document body one per interval, and the
//! settings store is polled so external edits reach the pipeline as sync-area
//! change notifications.

use std::time::Duration;

use sieve_engine::{Pipeline, StorageArea};
use sieve_logging::{sieve_info, sieve_warn};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::store::SettingsStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    /// Markup appended to the body, in order, to simulate infinite scroll.
    pub fragments: Vec<String>,
    pub scroll_interval: Duration,
    pub poll_interval: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            fragments: Vec::new(),
            scroll_interval: Duration::from_millis(2_000),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// Starts the pipeline and drives it until no timers remain and every
/// fragment has been appended. Returns the elapsed run time.
pub async fn run(
    pipeline: &mut Pipeline,
    mut store: Option<&mut SettingsStore>,
    options: &DriverOptions,
) -> Duration {
    let origin = Instant::now();
    pipeline.start();

    let mut fragments = options.fragments.iter();
    let mut next_append = (!options.fragments.is_empty()).then_some(options.scroll_interval);

    let mut poll = time::interval(options.poll_interval.max(Duration::from_millis(1)));
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let watching = store.is_some();

    loop {
        let wake = match (pipeline.next_deadline(), next_append) {
            (Some(a), Some(b)) => a.min(b),
            (Some(at), None) | (None, Some(at)) => at,
            (None, None) => break,
        };

        let polled = tokio::select! {
            _ = time::sleep_until(origin + wake) => false,
            _ = poll.tick(), if watching => true,
        };
        pipeline.advance_to(origin.elapsed());

        if polled {
            if let Some(store) = store.as_deref_mut() {
                reload_settings(pipeline, store);
            }
        }

        if next_append.is_some_and(|at| at <= pipeline.now()) {
            if let Some(fragment) = fragments.next() {
                append_fragment(pipeline, fragment);
            }
            next_append = if fragments.len() > 0 {
                next_append.map(|at| at + options.scroll_interval)
            } else {
                None
            };
        }
    }

    sieve_info!("Pipeline idle");
    pipeline.now()
}

fn reload_settings(pipeline: &mut Pipeline, store: &mut SettingsStore) {
    match store.poll() {
        Ok(Some(settings)) => {
            pipeline.storage_changed(StorageArea::Sync, settings);
        }
        Ok(None) => {}
        // A half-written file is retried on the next tick.
        Err(err) => sieve_warn!("Keeping current settings: {}", err),
    }
}

fn append_fragment(pipeline: &mut Pipeline, fragment: &str) {
    let added = pipeline.mutate(|doc| {
        let body = doc.body();
        doc.append_html(body, fragment)
    });
    sieve_info!("Scrolled: {} node(s) appended", added.len());
}
