use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::Metric;

/// Why a store snapshot could not be read as [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A key holds a value of the wrong type or an unknown variant.
    #[error("invalid settings value: {0}")]
    Invalid(#[from] serde_json::Error),
    /// The snapshot is not a key/value map.
    #[error("settings snapshot is not an object")]
    NotAnObject,
}

/// Global filtering mode, published through the settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Leave the feed untouched.
    Original,
    /// Filter the feed with the basic rule set.
    #[default]
    #[serde(alias = "clean")]
    FilteringBasic,
    /// Filter the feed; also carries the extended fields (whitelist, verified).
    #[serde(alias = "refined")]
    FilteringExtended,
}

impl Mode {
    /// Whether newly observed items go through extraction and filtering.
    pub fn is_filtering(self) -> bool {
        !matches!(self, Mode::Original)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageFilter {
    #[default]
    All,
    /// Keep only primary-language items.
    #[serde(alias = "zh")]
    TargetLanguage,
    /// Keep only items not in the primary language.
    #[serde(alias = "non-zh")]
    OtherLanguage,
}

/// Immutable snapshot of the user's filter configuration.
///
/// Keys follow the settings store (`camelCase`). Every field is optional in the
/// store and falls back to its default. Engagement bounds use `0` for "unset".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub mode: Mode,
    pub hide_short_text: bool,
    pub show_only_image: bool,
    pub show_only_video: bool,
    #[serde(alias = "showImageVideo")]
    pub show_image_or_video: bool,
    pub language_filter: LanguageFilter,
    pub min_views: u64,
    pub max_views: u64,
    pub min_likes: u64,
    pub max_likes: u64,
    pub min_retweets: u64,
    pub max_retweets: u64,
    #[serde(deserialize_with = "deserialize_handles")]
    pub whitelist: BTreeSet<String>,
    pub show_only_verified: bool,
}

impl Settings {
    /// Builds a snapshot from the store's key/value view.
    pub fn from_values(values: &Map<String, Value>) -> Result<Self, SettingsError> {
        Ok(serde_json::from_value(Value::Object(values.clone()))?)
    }

    pub fn from_value(value: Value) -> Result<Self, SettingsError> {
        if !value.is_object() {
            return Err(SettingsError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Key/value view for publishing back to the store.
    pub fn to_values(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Whether any media rule is switched on.
    pub fn any_media_toggle(&self) -> bool {
        self.show_only_image || self.show_only_video || self.show_image_or_video
    }

    /// `(min, max)` for a metric, `0` meaning no bound.
    pub fn bounds(&self, metric: Metric) -> (u64, u64) {
        match metric {
            Metric::Views => (self.min_views, self.max_views),
            Metric::Likes => (self.min_likes, self.max_likes),
            Metric::Retweets => (self.min_retweets, self.max_retweets),
        }
    }
}

/// Canonical form of a user handle: trimmed, no leading `@`, lower case.
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if bare.is_empty() {
        None
    } else {
        Some(bare.to_lowercase())
    }
}

fn deserialize_handles<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|h| normalize_handle(h)).collect())
}
