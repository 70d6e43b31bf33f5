//! Remote table client
//!
//! The uploader talks to the table through [`TableClient`], whose upsert call
//! always answers with an explicit [`UpsertOutcome`]. [`RestTableClient`] is
//! the implementation for a PostgREST endpoint such as Supabase.

use crate::upload::{Credentials, UploadError, UploadRow};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of one upsert call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Rows were accepted; `rows_affected` is what the endpoint reported back
    Success { rows_affected: usize },

    /// The call was rejected or never completed
    Failure { message: String },
}

/// Something that can upsert rows into a named table
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Inserts `rows`, updating existing rows that collide on `on_conflict`
    async fn upsert(&self, table: &str, on_conflict: &str, rows: &[UploadRow]) -> UpsertOutcome;
}

/// PostgREST table client
pub struct RestTableClient {
    client: Client,
    base_url: Url,
}

impl RestTableClient {
    /// Builds a client authenticated with the service key
    pub fn new(credentials: &Credentials) -> Result<Self, UploadError> {
        let mut base_url = Url::parse(&credentials.url).map_err(|e| {
            UploadError::CredentialMissing(format!(
                "Invalid project URL '{}': {}",
                credentials.url, e
            ))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let invalid_key = |_| {
            UploadError::CredentialMissing("Service key is not a valid header value".to_string())
        };
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&credentials.key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credentials.key)).map_err(invalid_key)?,
        );
        headers.insert(
            "prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn table_url(&self, table: &str, on_conflict: &str) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(&format!("rest/v1/{}", table))?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);
        Ok(url)
    }
}

#[async_trait]
impl TableClient for RestTableClient {
    async fn upsert(&self, table: &str, on_conflict: &str, rows: &[UploadRow]) -> UpsertOutcome {
        let url = match self.table_url(table, on_conflict) {
            Ok(url) => url,
            Err(e) => {
                return UpsertOutcome::Failure {
                    message: format!("Invalid table URL: {}", e),
                }
            }
        };

        let response = match self.client.post(url).json(rows).send().await {
            Ok(response) => response,
            Err(e) => {
                return UpsertOutcome::Failure {
                    message: e.to_string(),
                }
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return UpsertOutcome::Failure {
                message: format!("HTTP {}: {}", status.as_u16(), body.trim()),
            };
        }

        // return=minimal answers with an empty body
        let rows_affected = serde_json::from_str::<Vec<serde_json::Value>>(&body)
            .map(|rows| rows.len())
            .unwrap_or(0);

        UpsertOutcome::Success { rows_affected }
    }
}
