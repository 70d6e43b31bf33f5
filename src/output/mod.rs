//! Output module for crawl artifacts
//!
//! This module handles:
//! - Writing the deduplicated catalog as JSON
//! - Writing a diagnostic note when a crawl finds nothing
//! - Reading a catalog back for the uploader
//! - Crawl statistics and their console rendering

mod diagnostic;
mod json;
pub mod stats;

pub use diagnostic::{write_diagnostic, NO_RESULTS_MESSAGE};
pub use json::{read_catalog, write_catalog};
pub use stats::{format_statistics, print_statistics, CrawlStatistics};

use crate::config::OutputConfig;
use crate::crawler::CrawlReport;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Which artifact a crawl produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutput {
    /// Catalog written with `count` records
    Catalog { path: PathBuf, count: usize },

    /// Nothing was found; only the diagnostic note was written
    Diagnostic { path: PathBuf },
}

/// Writes the artifact for a finished crawl
///
/// A non-empty report produces the JSON catalog. An empty report produces the
/// diagnostic note instead, and no catalog file is written.
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `volume` - Volume the crawl swept, recorded in the diagnostic note
/// * `config` - Artifact paths
pub fn write_crawl_output(
    report: &CrawlReport,
    volume: &str,
    config: &OutputConfig,
) -> OutputResult<CrawlOutput> {
    if report.records.is_empty() {
        let path = PathBuf::from(&config.diagnostic_path);
        write_diagnostic(&path, volume, &report.stats)?;
        tracing::warn!("No courses parsed; wrote {}", path.display());
        return Ok(CrawlOutput::Diagnostic { path });
    }

    let path = PathBuf::from(&config.catalog_path);
    write_catalog(&report.records, &path)?;
    tracing::info!(
        "Saved {} unique courses to {}",
        report.records.len(),
        path.display()
    );

    Ok(CrawlOutput::Catalog {
        path,
        count: report.records.len(),
    })
}
