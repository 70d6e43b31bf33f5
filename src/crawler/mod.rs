//! Crawler module for sweeping the course search
//!
//! This module contains the core crawling logic, including:
//! - Query enumeration over the keyword alphabet
//! - HTTP fetching with a fixed identity
//! - Course record extraction with fallback strategies
//! - Next-page resolution
//! - Overall crawl coordination and deduplication

mod coordinator;
mod fetcher;
mod pagination;
mod parser;
mod query;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use pagination::find_next_page_url;
pub use parser::{
    extract_course_anchors, extract_table_rows, extract_with, parse_page, parse_results,
    ExtractionStrategy, PageResult, DEFAULT_STRATEGIES,
};
pub use query::{enumerate_queries, SearchQuery};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for phase one. It will:
/// 1. Build the HTTP client from the site configuration
/// 2. Enumerate one query per alphabet character
/// 3. Fetch and parse every result page of each query
/// 4. Merge records into a catalog keyed by course code
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The deduplicated records and run statistics
/// * `Err(HarvestError)` - The crawl could not be started
pub async fn crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    run_crawl(config).await
}
