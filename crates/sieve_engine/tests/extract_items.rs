mod common;

use common::{init_logging, page, Tweet};
use pretty_assertions::assert_eq;
use scraper::Selector;
use sieve_core::{Engagement, Media, Record};
use sieve_engine::{Document, Extractor, FeedItemExtractor, FeedMarkup, MarkupContract};

fn extract_all(html: &str) -> Vec<Record> {
    let doc = Document::parse(html, "https://x.com/home");
    let markup = FeedMarkup::standard();
    let extractor = FeedItemExtractor::new(markup.clone());
    doc.select(&markup.feed_item)
        .into_iter()
        .map(|node| extractor.extract(doc.element(node).unwrap()))
        .collect()
}

#[test]
fn extracts_text_media_and_engagement() {
    init_logging();
    let html = page(&[Tweet::text("hello world")
        .with_photo()
        .with_likes("1.2K")
        .with_reposts("3,400")
        .with_views("2M")]);

    let records = extract_all(&html);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.text(), "hello world");
    assert_eq!(record.media(), Media::Image);
    assert_eq!(
        record.engagement(),
        Engagement {
            views: 2_000_000,
            likes: 1_200,
            retweets: 3_400,
        }
    );
    assert_eq!(record.language().secondary_word_count, 2);
}

#[test]
fn video_wins_over_photo() {
    init_logging();
    let records = extract_all(&page(&[Tweet::text("clip").with_photo().with_video()]));
    assert_eq!(records[0].media(), Media::Video);
    assert!(!records[0].has_image());
}

#[test]
fn bare_video_element_counts_as_video() {
    init_logging();
    let html = r#"<html><body><article data-testid="tweet"><video src="a.mp4"></video></article></body></html>"#;
    assert_eq!(extract_all(html)[0].media(), Media::Video);
}

#[test]
fn missing_regions_yield_defaults() {
    init_logging();
    let html = r#"<html><body><article data-testid="tweet"><p>no markers here</p></article></body></html>"#;

    let records = extract_all(html);

    assert_eq!(records[0], Record::new("", Media::None, Engagement::default()));
}

#[test]
fn unreadable_counters_stay_unknown() {
    init_logging();
    let html = page(&[Tweet::text("x").with_likes("Like").with_views("")]);
    let record = &extract_all(&html)[0];
    assert_eq!(record.engagement().likes, 0);
    assert_eq!(record.engagement().views, 0);
}

#[test]
fn line_breaks_and_primary_script_text() {
    init_logging();
    let text = "第一行内容很长很长很长很长<br>第二行";
    let record = &extract_all(&page(&[Tweet::text(text)]))[0];
    assert_eq!(record.text(), "第一行内容很长很长很长很长\n第二行");
    assert!(record.is_primary_language());
    assert_eq!(record.language().primary_char_count, 16);
}

#[test]
fn extraction_leaves_document_untouched() {
    init_logging();
    let html = page(&[Tweet::text("same").with_likes("10")]);
    let doc = Document::parse(&html, "https://x.com/home");
    let markup = FeedMarkup::standard();
    let node = doc.select(&markup.feed_item)[0];
    let before = doc.element(node).unwrap().html();

    let extractor = FeedItemExtractor::new(markup);
    let first = extractor.extract(doc.element(node).unwrap());
    let second = extractor.extract(doc.element(node).unwrap());

    assert_eq!(first, second);
    assert_eq!(doc.element(node).unwrap().html(), before);
    assert_eq!(doc.inline_style(node), "");
}

#[test]
fn custom_contract_follows_markup_changes() {
    init_logging();
    let html = r#"<html><body>
        <div class="post"><span class="body">renamed markup</span>
          <nav><b data-k="like" aria-label="Like count">7</b></nav></div>
        </body></html>"#;
    let contract = MarkupContract {
        feed_item: "div.post".to_string(),
        text: "span.body".to_string(),
        action_control: "nav [aria-label]".to_string(),
        ..MarkupContract::default()
    };
    let markup = FeedMarkup::compile(&contract).unwrap();
    let doc = Document::parse(html, "https://example.com/");
    let sel = Selector::parse("div.post").unwrap();
    let node = doc.select(&sel)[0];

    let record = FeedItemExtractor::new(markup).extract(doc.element(node).unwrap());
    assert_eq!(record.text(), "renamed markup");
    assert_eq!(record.engagement().likes, 7);
}
