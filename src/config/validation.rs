use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UploadConfig};
use crate::ConfigError;
use reqwest::header::HeaderValue;
use std::collections::HashSet;
use url::Url;

/// Largest batch the uploader will send in one upsert call
const MAX_BATCH_SIZE: usize = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_upload_config(&config.upload)?;
    Ok(())
}

/// Validates the search site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.search_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "search-path cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    for (key, value) in [
        ("base-url", &config.base_url),
        ("user-agent", &config.user_agent),
        ("accept-language", &config.accept_language),
    ] {
        if HeaderValue::from_str(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "{} is not a valid header value",
                key
            )));
        }
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the keyword sweep
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.alphabet.is_empty() {
        return Err(ConfigError::Validation(
            "alphabet cannot be empty; the search rejects blank keywords".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for c in config.alphabet.chars() {
        if c.is_whitespace() {
            return Err(ConfigError::Validation(
                "alphabet cannot contain whitespace".to_string(),
            ));
        }
        if !seen.insert(c) {
            return Err(ConfigError::Validation(format!(
                "alphabet contains '{}' more than once",
                c
            )));
        }
    }

    if config.volume.trim().is_empty() {
        return Err(ConfigError::Validation("volume cannot be empty".to_string()));
    }

    if config.max_pages_per_query < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-per-query must be >= 1, got {}",
            config.max_pages_per_query
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.catalog_path.is_empty() {
        return Err(ConfigError::Validation(
            "catalog-path cannot be empty".to_string(),
        ));
    }

    if config.diagnostic_path.is_empty() {
        return Err(ConfigError::Validation(
            "diagnostic-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates uploader configuration
fn validate_upload_config(config: &UploadConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("table", &config.table),
        ("on-conflict", &config.on_conflict),
        ("institution", &config.institution),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if config.batch_size < 1 || config.batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE, config.batch_size
        )));
    }

    Ok(())
}
