use serde::Deserialize;

/// Main configuration structure for Course-Harvest
///
/// Built once at startup and handed by reference to the components that need
/// it, so tests can run the whole pipeline against an alternate site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub upload: UploadConfig,
}

/// The search site and the identity presented to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Base origin; also sent as the referer and used to resolve relative links
    pub base_url: String,

    /// Search path, joined onto `base_url`
    pub search_path: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Accept-Language header value
    pub accept_language: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kurser.dtu.dk/".to_string(),
            search_path: "search".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9,da;q=0.8".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Keyword sweep and pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Academic-year/term identifier sent as `Volume`
    pub volume: String,

    /// Characters swept as single-character search keywords, in order
    pub alphabet: String,

    /// Fixed delay after every fetched page (milliseconds)
    pub request_delay_ms: u64,

    /// Upper bound on pages followed for a single keyword
    pub max_pages_per_query: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            volume: "2025/2026".to_string(),
            alphabet: "abcdefghijklmnopqrstuvwxyz0123456789".to_string(),
            request_delay_ms: 400,
            max_pages_per_query: 500,
        }
    }
}

/// Where crawl artifacts are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// JSON catalog written when the crawl found at least one course
    pub catalog_path: String,

    /// Plain-text note written when the crawl found nothing
    pub diagnostic_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_path: "dtu_courses.json".to_string(),
            diagnostic_path: "debug_course_page.txt".to_string(),
        }
    }
}

/// Remote table settings for the uploader
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UploadConfig {
    /// Target table name
    pub table: String,

    /// Unique column used to resolve upsert conflicts
    pub on_conflict: String,

    /// Source-institution tag added to every uploaded row
    pub institution: String,

    /// Rows per upsert call
    pub batch_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            table: "courses".to_string(),
            on_conflict: "code".to_string(),
            institution: "DTU".to_string(),
            batch_size: 1000,
        }
    }
}
