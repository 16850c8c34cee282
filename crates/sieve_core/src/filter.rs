use crate::record::{Metric, Record};
use crate::settings::{LanguageFilter, Settings};

/// Primary-language items with fewer script characters count as short.
pub const SHORT_PRIMARY_CHARS: usize = 45;
/// Other items with fewer words count as short.
pub const SHORT_SECONDARY_WORDS: usize = 30;

/// The rule that caused an item to be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideRule {
    ShortText,
    Language,
    Media,
    BelowMinimum(Metric),
    AboveMaximum(Metric),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Show,
    Hide(HideRule),
}

impl Verdict {
    pub fn is_hidden(self) -> bool {
        matches!(self, Verdict::Hide(_))
    }
}

/// Pure filter decision. Rules run in a fixed order and the first one that
/// fires is reported; the hide/show outcome does not depend on that order.
pub fn evaluate(record: &Record, settings: &Settings) -> Verdict {
    let rules: [fn(&Record, &Settings) -> Option<HideRule>; 4] =
        [short_text_rule, language_rule, media_rule, engagement_rule];
    rules
        .iter()
        .find_map(|rule| rule(record, settings))
        .map_or(Verdict::Show, Verdict::Hide)
}

pub fn should_hide(record: &Record, settings: &Settings) -> bool {
    evaluate(record, settings).is_hidden()
}

fn short_text_rule(record: &Record, settings: &Settings) -> Option<HideRule> {
    if !settings.hide_short_text {
        return None;
    }
    let language = record.language();
    let short = if language.is_primary {
        language.primary_char_count < SHORT_PRIMARY_CHARS
    } else {
        language.secondary_word_count < SHORT_SECONDARY_WORDS
    };
    short.then_some(HideRule::ShortText)
}

fn language_rule(record: &Record, settings: &Settings) -> Option<HideRule> {
    let primary = record.is_primary_language();
    let mismatch = match settings.language_filter {
        LanguageFilter::All => false,
        LanguageFilter::TargetLanguage => !primary,
        LanguageFilter::OtherLanguage => primary,
    };
    mismatch.then_some(HideRule::Language)
}

fn media_rule(record: &Record, settings: &Settings) -> Option<HideRule> {
    if !settings.any_media_toggle() {
        return None;
    }
    let matched = (settings.show_only_image && record.has_image())
        || (settings.show_only_video && record.has_video())
        || (settings.show_image_or_video && (record.has_image() || record.has_video()));
    (!matched).then_some(HideRule::Media)
}

// An unknown (zero) metric never trips a bound.
fn engagement_rule(record: &Record, settings: &Settings) -> Option<HideRule> {
    let engagement = record.engagement();
    Metric::ALL.into_iter().find_map(|metric| {
        let value = engagement.get(metric);
        if value == 0 {
            return None;
        }
        let (min, max) = settings.bounds(metric);
        if min > 0 && value < min {
            Some(HideRule::BelowMinimum(metric))
        } else if max > 0 && value > max {
            Some(HideRule::AboveMaximum(metric))
        } else {
            None
        }
    })
}
