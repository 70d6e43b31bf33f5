//! Upload module for pushing a harvested catalog into a remote table
//!
//! This module handles:
//! - Resolving credentials from flags and the environment
//! - Tagging each course with its source institution
//! - Sending fixed-size upsert batches, stopping at the first failure
//!
//! Batches already accepted stay committed when a later batch fails.

mod client;
mod credentials;

pub use client::{RestTableClient, TableClient, UpsertOutcome};
pub use credentials::{Credentials, KEY_VARS, URL_VARS};

use crate::catalog::CourseRecord;
use crate::config::UploadConfig;
use crate::output::{read_catalog, OutputError};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while uploading
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing or invalid credentials: {0}")]
    CredentialMissing(String),

    #[error("Upsert of batch {batch} failed: {message}")]
    Upsert { batch: usize, message: String },

    #[error("Failed to read catalog: {0}")]
    Catalog(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// One row as stored in the remote table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRow {
    pub code: String,
    pub title: String,
    pub university: String,
}

impl UploadRow {
    pub fn from_record(record: CourseRecord, institution: &str) -> Self {
        Self {
            code: record.code,
            title: record.title,
            university: institution.to_string(),
        }
    }
}

/// Totals for an upload run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Upsert calls that succeeded
    pub batches: usize,

    /// Rows sent across all successful batches
    pub rows_submitted: usize,

    /// Rows the endpoint reported back
    pub rows_affected: usize,
}

impl UploadSummary {
    /// Rows to report to the operator
    ///
    /// Endpoints configured to return nothing report zero rows; the submitted
    /// count is the best estimate then.
    pub fn reported_rows(&self) -> usize {
        if self.rows_affected > 0 {
            self.rows_affected
        } else {
            self.rows_submitted
        }
    }
}

/// Upserts rows in batches of `config.batch_size`
///
/// Batches are sent one after another. The first failed batch ends the run
/// with [`UploadError::Upsert`]; batch numbers start at 1.
pub async fn upload_rows<C>(
    client: &C,
    rows: &[UploadRow],
    config: &UploadConfig,
) -> Result<UploadSummary, UploadError>
where
    C: TableClient + ?Sized,
{
    let mut summary = UploadSummary::default();
    let total_batches = rows.len().div_ceil(config.batch_size.max(1));

    for (index, batch) in rows.chunks(config.batch_size.max(1)).enumerate() {
        let number = index + 1;
        tracing::debug!("Upserting batch {}/{} ({} rows)", number, total_batches, batch.len());

        match client.upsert(&config.table, &config.on_conflict, batch).await {
            UpsertOutcome::Success { rows_affected } => {
                summary.batches += 1;
                summary.rows_submitted += batch.len();
                summary.rows_affected += rows_affected;
            }
            UpsertOutcome::Failure { message } => {
                tracing::error!("Batch {}/{} rejected: {}", number, total_batches, message);
                return Err(UploadError::Upsert {
                    batch: number,
                    message,
                });
            }
        }
    }

    Ok(summary)
}

/// Reads a catalog file and uploads it to the configured table
///
/// # Arguments
///
/// * `client` - Table client, already authenticated
/// * `catalog_path` - JSON catalog written by the crawl
/// * `config` - Table, conflict column, institution tag and batch size
pub async fn upload_catalog<C>(
    client: &C,
    catalog_path: &Path,
    config: &UploadConfig,
) -> Result<UploadSummary, UploadError>
where
    C: TableClient + ?Sized,
{
    let rows: Vec<UploadRow> = read_catalog(catalog_path)?
        .into_iter()
        .map(|record| UploadRow::from_record(record, &config.institution))
        .collect();

    tracing::info!(
        "Uploading {} courses from {} to table {}",
        rows.len(),
        catalog_path.display(),
        config.table
    );

    upload_rows(client, &rows, config).await
}
