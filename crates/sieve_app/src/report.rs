use std::fmt;

use serde::Serialize;
use sieve_core::{ItemState, Media, Verdict};
use sieve_engine::{ItemReport, Pipeline};

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    pub item: Option<u64>,
    pub state: &'static str,
    pub hidden: bool,
    pub verdict: Option<String>,
    pub media: Option<&'static str>,
    pub views: u64,
    pub likes: u64,
    pub retweets: u64,
    pub primary_language: Option<bool>,
    pub preview: String,
}

impl ItemLine {
    fn from_report(report: &ItemReport) -> Self {
        let record = report.record.as_deref();
        let engagement = record.map(|r| r.engagement()).unwrap_or_default();
        Self {
            item: report.item,
            state: state_name(report.state),
            hidden: report.hidden,
            verdict: report.verdict.map(verdict_name),
            media: record.map(|r| media_name(r.media())),
            views: engagement.views,
            likes: engagement.likes,
            retweets: engagement.retweets,
            primary_language: record.map(|r| r.is_primary_language()),
            preview: record.map(|r| preview(r.text())).unwrap_or_default(),
        }
    }
}

/// Final state of one run, printed as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub location: String,
    pub elapsed_ms: u64,
    pub mode: String,
    pub banner: bool,
    pub total: usize,
    pub hidden: usize,
    pub items: Vec<ItemLine>,
}

impl RunReport {
    pub fn collect(pipeline: &Pipeline) -> Self {
        let items: Vec<ItemLine> = pipeline.report().iter().map(ItemLine::from_report).collect();
        Self {
            location: pipeline.document().location().to_string(),
            elapsed_ms: pipeline.now().as_millis() as u64,
            mode: format!("{:?}", pipeline.settings().mode),
            banner: pipeline.banner_visible(),
            total: items.len(),
            hidden: items.iter().filter(|line| line.hidden).count(),
            items,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} after {} ms, mode {}: {} of {} item(s) hidden",
            self.location, self.elapsed_ms, self.mode, self.hidden, self.total
        )?;
        for line in &self.items {
            let id = line.item.map_or_else(|| "-".to_string(), |id| id.to_string());
            writeln!(
                f,
                "#{:<4} {:<11} {:<6} {:<22} {:<5} v={} l={} r={}  {}",
                id,
                line.state,
                if line.hidden { "HIDDEN" } else { "shown" },
                line.verdict.as_deref().unwrap_or("-"),
                line.media.unwrap_or("-"),
                line.views,
                line.likes,
                line.retweets,
                line.preview,
            )?;
        }
        if self.banner {
            writeln!(f, "advisory: shown (filter too strict)")?;
        }
        Ok(())
    }
}

fn state_name(state: ItemState) -> &'static str {
    match state {
        ItemState::Unprocessed => "unprocessed",
        ItemState::Pending => "pending",
        ItemState::Done => "done",
    }
}

fn media_name(media: Media) -> &'static str {
    match media {
        Media::None => "text",
        Media::Image => "image",
        Media::Video => "video",
    }
}

fn verdict_name(verdict: Verdict) -> String {
    match verdict {
        Verdict::Show => "show".to_string(),
        Verdict::Hide(rule) => format!("hide:{rule:?}"),
    }
}

/// First line of the text, cut at a character boundary.
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default().trim();
    let mut out: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}
