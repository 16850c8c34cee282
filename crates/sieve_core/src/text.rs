use std::sync::LazyLock;

use regex::Regex;

use crate::record::LanguageStats;

const PRIMARY_MIN_CHARS: usize = 10;
const PRIMARY_MIN_RATIO: f64 = 0.4;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("mention pattern"));

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9,.]+)([KMB]?)").expect("count pattern"));

/// CJK unified ideographs.
pub fn is_primary_script(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn classify_language(text: &str) -> LanguageStats {
    let total = text.chars().count();
    let primary = text.chars().filter(|c| is_primary_script(*c)).count();
    let is_primary = primary > PRIMARY_MIN_CHARS
        || (primary > 0 && primary as f64 / total as f64 > PRIMARY_MIN_RATIO);

    LanguageStats {
        is_primary,
        primary_char_count: primary,
        secondary_word_count: count_secondary_words(text),
    }
}

/// Words outside the primary script, ignoring links and @-mentions.
pub fn count_secondary_words(text: &str) -> usize {
    let without_urls = URL_RE.replace_all(text, "");
    let stripped = MENTION_RE.replace_all(&without_urls, "");
    stripped
        .split_whitespace()
        .filter(|word| !word.chars().any(is_primary_script))
        .count()
}

/// Parses a rendered engagement counter such as `1.2K`, `3,400` or `2M`.
///
/// Unreadable input yields `0`, which downstream means "unknown".
pub fn parse_count(raw: &str) -> u64 {
    let Some(caps) = COUNT_RE.captures(raw.trim()) else {
        return 0;
    };
    let digits: String = caps[1].chars().filter(|c| *c != ',').collect();
    let multiplier: u128 = match caps[2].to_ascii_uppercase().as_str() {
        "K" => 1_000,
        "M" => 1_000_000,
        "B" => 1_000_000_000,
        _ => 1,
    };
    scaled_floor(&digits, multiplier).unwrap_or(0)
}

// Exact decimal arithmetic: `floor(token * multiplier)` for the leading
// `whole[.frac]` of the token; anything after a second dot is ignored.
fn scaled_floor(token: &str, multiplier: u128) -> Option<u64> {
    let mut parts = token.split('.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let frac = &frac[..frac.len().min(18)];

    let whole_val: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_val: u128 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    let denom = 10u128.pow(frac.len() as u32);

    let total = whole_val
        .checked_mul(multiplier)?
        .checked_add(frac_val * multiplier / denom)?;
    u64::try_from(total).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_suffixed_and_grouped_counts() {
        assert_eq!(parse_count("1.2K"), 1_200);
        assert_eq!(parse_count("3,400"), 3_400);
        assert_eq!(parse_count("2M"), 2_000_000);
        assert_eq!(parse_count("1.5b"), 1_500_000_000);
        assert_eq!(parse_count("  42  "), 42);
        assert_eq!(parse_count("2.3K"), 2_300);
    }

    #[test]
    fn unreadable_counts_are_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("Like"), 0);
        assert_eq!(parse_count("."), 0);
        assert_eq!(parse_count(",,"), 0);
    }

    #[test]
    fn count_takes_first_numeric_token() {
        assert_eq!(parse_count("Views 12K more 5"), 12_000);
        assert_eq!(parse_count("1.2.3"), 1);
        assert_eq!(parse_count(".5K"), 500);
    }

    #[test]
    fn language_thresholds() {
        let eleven = "一二三四五六七八九十百";
        assert!(classify_language(eleven).is_primary);

        // 5 of 8 characters.
        assert!(classify_language("一二三四五abc").is_primary);

        let mostly_latin = format!("一二三{}", "a".repeat(47));
        let stats = classify_language(&mostly_latin);
        assert_eq!(stats.primary_char_count, 3);
        assert!(!stats.is_primary);

        assert!(!classify_language("").is_primary);
    }

    #[test]
    fn secondary_words_skip_links_mentions_and_primary_tokens() {
        let text = "hello @someone world https://t.co/xyz 你好 again";
        assert_eq!(count_secondary_words(text), 3);
        assert_eq!(count_secondary_words("   "), 0);
    }
}
