//! Next-page link resolution
//!
//! A result page may point to the following page either with an explicit
//! `rel="next"` link or with an anchor whose visible text is a "next" marker.

use crate::crawler::parser::element_text;
use scraper::{Html, Selector};
use url::Url;

/// Anchor texts treated as "next page", compared lowercased and trimmed
const NEXT_MARKERS: &[&str] = &["next", ">", "›"];

/// Finds the next-page URL in a result page
///
/// Resolution order:
/// 1. The first `a` or `link` whose `rel` contains `next` and has an href
/// 2. The first anchor with an href whose text is `next`, `>` or `›`
///
/// The href is resolved against `base_url`. Earliest in document order wins
/// within each step.
///
/// # Example
///
/// ```
/// use course_harvest::crawler::find_next_page_url;
/// use url::Url;
///
/// let base = Url::parse("https://kurser.dtu.dk/").unwrap();
/// let html = r#"<a href="search?page=2">Next</a>"#;
/// let next = find_next_page_url(html, &base).unwrap();
/// assert_eq!(next.as_str(), "https://kurser.dtu.dk/search?page=2");
/// ```
pub fn find_next_page_url(html: &str, base_url: &Url) -> Option<Url> {
    resolve_next(&Html::parse_document(html), base_url)
}

/// Same as [`find_next_page_url`] on an already parsed document
pub(crate) fn resolve_next(document: &Html, base_url: &Url) -> Option<Url> {
    if let Ok(rel_selector) = Selector::parse("a[rel~='next'][href], link[rel~='next'][href]") {
        for element in document.select(&rel_selector) {
            if let Some(url) = element.value().attr("href").and_then(|h| resolve(h, base_url)) {
                return Some(url);
            }
        }
    }

    let anchor_selector = Selector::parse("a[href]").ok()?;
    for anchor in document.select(&anchor_selector) {
        let text = element_text(&anchor).to_lowercase();
        if !NEXT_MARKERS.contains(&text.as_str()) {
            continue;
        }
        if let Some(url) = anchor.value().attr("href").and_then(|h| resolve(h, base_url)) {
            return Some(url);
        }
    }

    None
}

/// Resolves an href against the site base, ignoring empty and fragment-only links
fn resolve(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    base_url.join(href).ok()
}
