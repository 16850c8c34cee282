use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;
use sieve_core::{parse_count, Engagement, Media, Record};

use crate::markup::FeedMarkup;

pub trait Extractor: Send + Sync {
    fn extract(&self, item: ElementRef<'_>) -> Record;
}

/// Reads a feed item through the markup contract:
/// - text of the first text region (empty if missing)
/// - video wins over a photo region
/// - engagement counters from labelled action-bar controls
///
/// Never mutates the item and never fails; missing regions yield defaults.
#[derive(Debug, Clone)]
pub struct FeedItemExtractor {
    markup: FeedMarkup,
}

impl FeedItemExtractor {
    pub fn new(markup: FeedMarkup) -> Self {
        Self { markup }
    }

    fn engagement(&self, item: ElementRef<'_>) -> Engagement {
        let mut engagement = Engagement::default();
        for control in item.select(&self.markup.action_control) {
            let label = control.value().attr("aria-label").unwrap_or_default();
            let Some(metric) = self.markup.keywords.classify(label) else {
                continue;
            };
            let shown: String = control.text().collect();
            engagement.set(metric, parse_count(&shown));
        }
        engagement
    }
}

impl Extractor for FeedItemExtractor {
    fn extract(&self, item: ElementRef<'_>) -> Record {
        let text = item
            .select(&self.markup.text)
            .next()
            .map(rendered_text)
            .unwrap_or_default();
        let has_video = item.select(&self.markup.video).next().is_some();
        let has_photo = item.select(&self.markup.photo).next().is_some();

        Record::new(
            text,
            Media::detect(has_video, has_photo),
            self.engagement(item),
        )
    }
}

/// Text as a reader sees it: text nodes in order, `<br>` as a line break,
/// scripts and styles skipped.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    visit(*element, &mut out);
    out
}

fn visit(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => match element.name() {
            "br" => out.push('\n'),
            "script" | "style" | "noscript" | "template" => {}
            _ => node.children().for_each(|child| visit(child, out)),
        },
        _ => node.children().for_each(|child| visit(child, out)),
    }
}
