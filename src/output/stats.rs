//! Crawl statistics
//!
//! Counters gathered by the coordinator while it walks the search pages, and
//! the console rendering shown after a crawl.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Queries whose page chain ran to completion or failure
    pub queries_run: u64,

    /// Pages fetched with status 200
    pub pages_fetched: u64,

    /// Page requests that failed (non-200 or network error)
    pub fetch_failures: u64,

    /// Records extracted across all pages, duplicates included
    pub records_seen: u64,

    /// Records dropped because their code was already in the catalog
    pub duplicates_skipped: u64,

    /// Page chains stopped by the page cap or a link back to a visited page
    pub chains_cut: u64,

    /// Size of the final catalog
    pub unique_courses: u64,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Pages requested, successful or not
    pub fn pages_attempted(&self) -> u64 {
        self.pages_fetched + self.fetch_failures
    }
}

/// Formats statistics for the console
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();
    out.push_str("=== Crawl Statistics ===\n\n");
    out.push_str(&format!("Queries run:        {}\n", stats.queries_run));
    out.push_str(&format!("Pages fetched:      {}\n", stats.pages_fetched));
    out.push_str(&format!("Fetch failures:     {}\n", stats.fetch_failures));
    out.push_str(&format!("Records seen:       {}\n", stats.records_seen));
    out.push_str(&format!("Duplicates skipped: {}\n", stats.duplicates_skipped));
    if stats.chains_cut > 0 {
        out.push_str(&format!("Chains cut short:   {}\n", stats.chains_cut));
    }
    out.push_str(&format!("Unique courses:     {}\n", stats.unique_courses));
    out.push_str(&format!(
        "Elapsed:            {:.1}s\n",
        stats.elapsed.as_secs_f64()
    ));
    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("{}", format_statistics(stats));
}
