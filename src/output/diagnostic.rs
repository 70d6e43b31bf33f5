//! Diagnostic note for a crawl that found nothing

use crate::output::{CrawlStatistics, OutputResult};
use chrono::Utc;
use std::path::Path;

/// First line of the diagnostic file
pub const NO_RESULTS_MESSAGE: &str =
    "No results parsed. Check if the HTML structure changed or requires JS.";

/// Writes the plain-text diagnostic note
pub fn write_diagnostic(path: &Path, volume: &str, stats: &CrawlStatistics) -> OutputResult<()> {
    let text = format!(
        "{}\n\n\
         volume: {}\n\
         queries run: {}\n\
         pages attempted: {}\n\
         fetch failures: {}\n\
         generated at: {}\n",
        NO_RESULTS_MESSAGE,
        volume,
        stats.queries_run,
        stats.pages_attempted(),
        stats.fetch_failures,
        Utc::now().to_rfc3339()
    );
    std::fs::write(path, text)?;
    Ok(())
}
