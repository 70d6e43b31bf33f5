//! HTML parser for extracting course records
//!
//! Search result pages have come in more than one shape, so extraction is an
//! ordered list of strategies. Each strategy is a pure function from a parsed
//! document to course records; the first one that finds anything wins and the
//! rest are never run for that page.
//!
//! 1. `table-rows`: every table row with at least two cells, code in the
//!    first cell and title in the second
//! 2. `course-anchors`: links into the course pages whose text starts with
//!    the code, e.g. `<a href="/course/01001">01001 - Mathematics 1a</a>`

use crate::catalog::CourseRecord;
use crate::crawler::pagination::resolve_next;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Substring an anchor's href must contain to be read as a course link
const COURSE_PATH_MARKER: &str = "/course";

/// Characters stripped from the front of an anchor title after the code
const TITLE_SEPARATORS: &[char] = &['-', '–', '—', ':', ' '];

/// A named extraction strategy
#[derive(Debug, Clone, Copy)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub extract: fn(&Html) -> Vec<CourseRecord>,
}

/// Strategies in the order they are tried
pub const DEFAULT_STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "table-rows",
        extract: extract_table_rows,
    },
    ExtractionStrategy {
        name: "course-anchors",
        extract: extract_course_anchors,
    },
];

/// What one fetched page contributed
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Records in document order
    pub records: Vec<CourseRecord>,

    /// Absolute URL of the next result page, if any
    pub next_page_url: Option<Url>,
}

/// Parses a result page into its records and next-page link
///
/// # Arguments
///
/// * `html` - The page markup
/// * `base_url` - Site base used to resolve a relative next-page link
pub fn parse_page(html: &str, base_url: &Url) -> PageResult {
    let document = Html::parse_document(html);
    PageResult {
        records: extract_with(&document, DEFAULT_STRATEGIES),
        next_page_url: resolve_next(&document, base_url),
    }
}

/// Extracts course records from page markup using the default strategies
///
/// # Example
///
/// ```
/// use course_harvest::crawler::parse_results;
///
/// let html = r#"<table><tr><td>01001</td><td>Mathematics 1a</td></tr></table>"#;
/// let records = parse_results(html);
/// assert_eq!(records[0].code, "01001");
/// assert_eq!(records[0].title, "Mathematics 1a");
/// ```
pub fn parse_results(html: &str) -> Vec<CourseRecord> {
    extract_with(&Html::parse_document(html), DEFAULT_STRATEGIES)
}

/// Runs strategies in order and returns the first non-empty result
pub fn extract_with(document: &Html, strategies: &[ExtractionStrategy]) -> Vec<CourseRecord> {
    for strategy in strategies {
        let records = (strategy.extract)(document);
        if !records.is_empty() {
            tracing::trace!(
                "Strategy {} extracted {} records",
                strategy.name,
                records.len()
            );
            return records;
        }
    }
    Vec::new()
}

/// Reads `code | title` pairs out of table rows
///
/// Rows with fewer than two cells, no five-digit number in the first cell, or
/// an empty second cell are skipped.
pub fn extract_table_rows(document: &Html) -> Vec<CourseRecord> {
    let (Ok(row_selector), Ok(cell_selector)) = (Selector::parse("table tr"), Selector::parse("td"))
    else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 2 {
            continue;
        }

        let first_cell = element_text(&cells[0]);
        let Some(code) = find_code(&first_cell) else {
            continue;
        };

        if let Some(record) = CourseRecord::new(code, element_text(&cells[1])) {
            records.push(record);
        }
    }

    records
}

/// Reads course links of the form `<code> - <title>`
///
/// The title is the text after the code with leading separators removed; if
/// nothing follows the code, the anchor's `title` attribute is used instead.
pub fn extract_course_anchors(document: &Html) -> Vec<CourseRecord> {
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for anchor in document.select(&anchor_selector) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if !href.contains(COURSE_PATH_MARKER) {
            continue;
        }

        let text = element_text(&anchor);
        let Some(found) = code_pattern().find(&text) else {
            continue;
        };

        let rest = text[found.end()..]
            .trim_start_matches(TITLE_SEPARATORS)
            .trim_end();
        let title = if rest.is_empty() {
            anchor.value().attr("title").unwrap_or_default()
        } else {
            rest
        };

        if let Some(record) = CourseRecord::new(found.as_str(), title) {
            records.push(record);
        }
    }

    records
}

/// Standalone five-digit number
fn code_pattern() -> &'static Regex {
    static CODE_PATTERN: OnceLock<Regex> = OnceLock::new();
    CODE_PATTERN.get_or_init(|| Regex::new(r"\b[0-9]{5}\b").expect("course code pattern is valid"))
}

fn find_code(text: &str) -> Option<&str> {
    code_pattern().find(text).map(|m| m.as_str())
}

/// Element text with whitespace runs collapsed to single spaces
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
