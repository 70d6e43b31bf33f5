//! Configuration module for Course-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default, so running without a file targets the DTU course
//! search for the current academic year.
//!
//! # Example
//!
//! ```no_run
//! use course_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Sweeping volume {}", config.crawler.volume);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UploadConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
