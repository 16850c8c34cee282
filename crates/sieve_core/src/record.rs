use crate::text::classify_language;

/// Attached media, at most one kind per item. Video wins over a photo region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Media {
    #[default]
    None,
    Image,
    Video,
}

impl Media {
    pub fn detect(has_video: bool, has_photo: bool) -> Self {
        if has_video {
            Media::Video
        } else if has_photo {
            Media::Image
        } else {
            Media::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Views,
    Likes,
    Retweets,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Views, Metric::Likes, Metric::Retweets];
}

/// Engagement counters. `0` means the counter was absent or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Engagement {
    pub views: u64,
    pub likes: u64,
    pub retweets: u64,
}

impl Engagement {
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Views => self.views,
            Metric::Likes => self.likes,
            Metric::Retweets => self.retweets,
        }
    }

    pub fn set(&mut self, metric: Metric, value: u64) {
        match metric {
            Metric::Views => self.views = value,
            Metric::Likes => self.likes = value,
            Metric::Retweets => self.retweets = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageStats {
    pub is_primary: bool,
    pub primary_char_count: usize,
    pub secondary_word_count: usize,
}

/// Attributes extracted once from a feed item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    text: String,
    media: Media,
    language: LanguageStats,
    engagement: Engagement,
}

impl Record {
    pub fn new(text: impl Into<String>, media: Media, engagement: Engagement) -> Self {
        let text = text.into();
        let language = classify_language(&text);
        Self {
            text,
            media,
            language,
            engagement,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn media(&self) -> Media {
        self.media
    }

    pub fn has_image(&self) -> bool {
        self.media == Media::Image
    }

    pub fn has_video(&self) -> bool {
        self.media == Media::Video
    }

    pub fn language(&self) -> LanguageStats {
        self.language
    }

    pub fn is_primary_language(&self) -> bool {
        self.language.is_primary
    }

    pub fn engagement(&self) -> Engagement {
        self.engagement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_takes_precedence_over_photo() {
        assert_eq!(Media::detect(true, true), Media::Video);
        assert_eq!(Media::detect(false, true), Media::Image);
        assert_eq!(Media::detect(false, false), Media::None);

        let record = Record::new("", Media::detect(true, true), Engagement::default());
        assert!(record.has_video());
        assert!(!record.has_image());
    }

    #[test]
    fn record_classifies_its_text() {
        let record = Record::new("你好世界你好世界你好世界", Media::None, Engagement::default());
        assert!(record.is_primary_language());
        assert_eq!(record.language().primary_char_count, 12);
    }
}
