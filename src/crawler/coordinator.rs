//! Crawler coordinator - main crawl orchestration logic
//!
//! For every query from the enumerator the coordinator walks the result pages:
//!
//! ```text
//! START -> FETCH -> PARSE_MERGE -> RESOLVE_NEXT -> (FETCH | DONE)
//! ```
//!
//! A fetch failure ends that query's chain early; the next query starts
//! normally. Requests are strictly sequential and every fetched page is
//! followed by the fixed pacing delay.

use crate::catalog::{CourseCatalog, CourseRecord};
use crate::config::Config;
use crate::crawler::parser::parse_page;
use crate::crawler::query::{enumerate_queries, SearchQuery};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::output::CrawlStatistics;
use crate::HarvestError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// Outcome of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Catalog contents in insertion order
    pub records: Vec<CourseRecord>,

    /// Counters gathered during the run
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    base_url: Url,
    catalog: CourseCatalog,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Client built and base URL parsed
    /// * `Err(HarvestError)` - Failed to initialize
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config.site)?;

        Ok(Self {
            config,
            client,
            base_url,
            catalog: CourseCatalog::new(),
            stats: CrawlStatistics::default(),
        })
    }

    /// Runs every query to completion and returns the catalog
    pub async fn run(mut self) -> Result<CrawlReport, HarvestError> {
        let queries = enumerate_queries(&self.config.crawler);
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl of volume {} with {} queries",
            self.config.crawler.volume,
            queries.len()
        );

        for query in &queries {
            let before = self.catalog.len();
            self.crawl_query(query).await?;
            self.stats.queries_run += 1;

            tracing::info!(
                "Query '{}' done: {} new courses, {} total",
                query.keyword,
                self.catalog.len() - before,
                self.catalog.len()
            );
        }

        self.stats.unique_courses = self.catalog.len() as u64;
        self.stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} unique courses from {} pages in {:?}",
            self.stats.unique_courses,
            self.stats.pages_fetched,
            self.stats.elapsed
        );

        Ok(CrawlReport {
            records: self.catalog.into_records(),
            stats: self.stats,
        })
    }

    /// Follows one query's result pages until there is no next page
    async fn crawl_query(&mut self, query: &SearchQuery) -> Result<(), HarvestError> {
        let mut url = query.to_url(&self.config.site)?;
        let mut visited: HashSet<Url> = HashSet::new();
        let max_pages = self.config.crawler.max_pages_per_query;

        loop {
            visited.insert(url.clone());
            tracing::debug!("Fetching {}", url);

            let next = match fetch_url(&self.client, &url).await {
                FetchResult::Success { final_url, body } => {
                    tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());
                    self.stats.pages_fetched += 1;
                    let page = parse_page(&body, &self.base_url);
                    self.merge_page(page.records);
                    page.next_page_url
                }
                FetchResult::HttpError { status_code } => {
                    tracing::debug!(
                        "Abandoning query '{}' after HTTP {} on {}",
                        query.keyword,
                        status_code,
                        url
                    );
                    self.stats.fetch_failures += 1;
                    None
                }
                FetchResult::NetworkError { error } => {
                    tracing::debug!(
                        "Abandoning query '{}' after network error on {}: {}",
                        query.keyword,
                        url,
                        error
                    );
                    self.stats.fetch_failures += 1;
                    None
                }
            };

            self.pace().await;

            let Some(next) = next else {
                break;
            };

            if visited.contains(&next) {
                tracing::warn!("Query '{}' links back to {}; stopping", query.keyword, next);
                self.stats.chains_cut += 1;
                break;
            }

            if visited.len() >= max_pages as usize {
                tracing::warn!(
                    "Query '{}' reached {} pages; stopping",
                    query.keyword,
                    max_pages
                );
                self.stats.chains_cut += 1;
                break;
            }

            url = next;
        }

        Ok(())
    }

    /// Merges one page's records, keeping first-seen titles
    fn merge_page(&mut self, records: Vec<CourseRecord>) {
        let seen = records.len() as u64;
        let added = self.catalog.merge_all(records) as u64;

        self.stats.records_seen += seen;
        self.stats.duplicates_skipped += seen - added;

        tracing::debug!("Page yielded {} records, {} new", seen, added);
    }

    /// Fixed delay between requests
    async fn pace(&self) {
        let delay = self.config.crawler.request_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

/// Runs a complete crawl with the given configuration
pub async fn run_crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    Coordinator::new(config)?.run().await
}
