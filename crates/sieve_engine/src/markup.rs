//! The host page's markup contract.
//!
//! Selector strings and accessible-label keywords belong to a third party and
//! change without notice, so they are configuration rather than code.

use scraper::Selector;
use serde::{Deserialize, Serialize};
use sieve_core::Metric;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("invalid selector for {field}: {selector:?} ({message})")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupContract {
    pub feed_item: String,
    pub text: String,
    /// Any of these marks an item as carrying video.
    pub video: Vec<String>,
    pub photo: String,
    /// Interactive controls inside the engagement action bar.
    pub action_control: String,
    pub view_keywords: Vec<String>,
    pub like_keywords: Vec<String>,
    pub retweet_keywords: Vec<String>,
}

impl Default for MarkupContract {
    fn default() -> Self {
        Self {
            feed_item: r#"article[data-testid="tweet"]"#.to_string(),
            text: r#"[data-testid="tweetText"]"#.to_string(),
            video: vec!["video".to_string(), r#"[data-testid="videoPlayer"]"#.to_string()],
            photo: r#"[data-testid="tweetPhoto"]"#.to_string(),
            action_control: r#"[role="group"] [role="button"]"#.to_string(),
            view_keywords: vec!["view".to_string(), "浏览".to_string()],
            like_keywords: vec!["like".to_string()],
            retweet_keywords: vec!["repost".to_string(), "retweet".to_string()],
        }
    }
}

/// Lower-cased label keywords per metric. Views are checked first, then likes,
/// then retweets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelKeywords {
    views: Vec<String>,
    likes: Vec<String>,
    retweets: Vec<String>,
}

impl LabelKeywords {
    pub fn new(views: &[String], likes: &[String], retweets: &[String]) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            views: lower(views),
            likes: lower(likes),
            retweets: lower(retweets),
        }
    }

    pub fn classify(&self, label: &str) -> Option<Metric> {
        let label = label.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|w| label.contains(w.as_str()));
        if hit(&self.views) {
            Some(Metric::Views)
        } else if hit(&self.likes) {
            Some(Metric::Likes)
        } else if hit(&self.retweets) {
            Some(Metric::Retweets)
        } else {
            None
        }
    }
}

/// Compiled form of a [`MarkupContract`].
#[derive(Debug, Clone)]
pub struct FeedMarkup {
    pub feed_item: Selector,
    pub text: Selector,
    pub video: Selector,
    pub photo: Selector,
    pub action_control: Selector,
    pub keywords: LabelKeywords,
}

impl FeedMarkup {
    pub fn compile(contract: &MarkupContract) -> Result<Self, MarkupError> {
        Ok(Self {
            feed_item: compile_selector("feed_item", &contract.feed_item)?,
            text: compile_selector("text", &contract.text)?,
            video: compile_selector("video", &contract.video.join(", "))?,
            photo: compile_selector("photo", &contract.photo)?,
            action_control: compile_selector("action_control", &contract.action_control)?,
            keywords: LabelKeywords::new(
                &contract.view_keywords,
                &contract.like_keywords,
                &contract.retweet_keywords,
            ),
        })
    }

    /// The built-in contract for the current host markup.
    pub fn standard() -> Self {
        Self::compile(&MarkupContract::default()).expect("built-in selectors are valid")
    }
}

fn compile_selector(field: &'static str, selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|err| MarkupError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_contract_compiles() {
        let markup = FeedMarkup::standard();
        assert_eq!(markup.keywords.classify("1.2K Views. View post analytics"), Some(Metric::Views));
    }

    #[test]
    fn label_classification_is_case_insensitive_and_ordered() {
        let keywords = LabelKeywords::new(
            &["view".to_string(), "浏览".to_string()],
            &["like".to_string()],
            &["repost".to_string(), "retweet".to_string()],
        );
        assert_eq!(keywords.classify("12 Likes. Like"), Some(Metric::Likes));
        assert_eq!(keywords.classify("5 REPOSTS. Repost"), Some(Metric::Retweets));
        assert_eq!(keywords.classify("3 次浏览"), Some(Metric::Views));
        assert_eq!(keywords.classify("Reply"), None);
        assert_eq!(keywords.classify(""), None);
    }

    #[test]
    fn bad_selector_is_reported_with_field() {
        let contract = MarkupContract {
            photo: "[[[".to_string(),
            ..MarkupContract::default()
        };
        let err = FeedMarkup::compile(&contract).unwrap_err();
        assert!(matches!(err, MarkupError::InvalidSelector { field: "photo", .. }));
    }
}
