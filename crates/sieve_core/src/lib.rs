//! Sieve core: settings, records, the filter engine and the pure item state machine.
mod advisory;
mod cache;
mod effect;
mod filter;
mod msg;
mod record;
mod settings;
mod state;
mod text;
mod update;

pub use advisory::{advise, Advisory, Tally, ADVISORY_MIN_DONE};
pub use cache::RecordCache;
pub use effect::Effect;
pub use filter::{evaluate, should_hide, HideRule, Verdict, SHORT_PRIMARY_CHARS, SHORT_SECONDARY_WORDS};
pub use msg::Msg;
pub use record::{Engagement, LanguageStats, Media, Metric, Record};
pub use settings::{normalize_handle, LanguageFilter, Mode, Settings, SettingsError};
pub use state::{is_detail_view, ItemId, ItemState, WatcherState, WatcherSummary};
pub use text::{classify_language, count_secondary_words, is_primary_script, parse_count};
pub use update::update;
