use crate::document::Document;

pub const BANNER_ID: &str = "feed-sieve-notification";

const BANNER_HTML: &str = r#"<div id="feed-sieve-notification" role="alert" style="position: fixed; top: 60px; left: 50%; transform: translateX(-50%); z-index: 10000; max-width: 500px; padding: 16px 20px; border-radius: 12px; color: white; background: linear-gradient(135deg, #1d9bf0 0%, #1a8cd8 100%);">
  <div style="display: flex; align-items: center; gap: 12px;">
    <div style="font-size: 24px;">⚠️</div>
    <div style="flex: 1;">
      <div style="font-weight: 600; margin-bottom: 4px;">Filter too strict</div>
      <div style="font-size: 13px; opacity: 0.9;">Almost nothing in the feed passes the current filters. Consider relaxing them.</div>
    </div>
    <button type="button" data-sieve-dismiss="true" aria-label="Dismiss">×</button>
  </div>
</div>"#;

pub fn banner_visible(document: &Document) -> bool {
    document.find_by_dom_id(BANNER_ID).is_some()
}

/// Adds the advisory to the page body. Returns false if one is already showing.
pub fn show_banner(document: &mut Document) -> bool {
    if banner_visible(document) {
        return false;
    }
    let body = document.body();
    !document.append_html(body, BANNER_HTML).is_empty()
}

/// Removes the advisory if present.
pub fn hide_banner(document: &mut Document) -> bool {
    match document.find_by_dom_id(BANNER_ID) {
        Some(node) => document.remove(node),
        None => false,
    }
}
