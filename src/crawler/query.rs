//! Search query enumeration
//!
//! The search endpoint rejects blank keywords, so a sweep issues one query per
//! character of the configured alphabet. Courses whose text never contains a
//! single swept character are not reachable this way.

use crate::config::{CrawlerConfig, SiteConfig};
use url::Url;

/// One set of search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Single-character search keyword
    pub keyword: String,

    /// Academic-year/term identifier
    pub volume: String,
}

impl SearchQuery {
    /// Builds the absolute search URL for this query
    ///
    /// The other filter fields are sent empty, in the order the search form
    /// submits them.
    ///
    /// # Example
    ///
    /// ```
    /// use course_harvest::config::SiteConfig;
    /// use course_harvest::crawler::SearchQuery;
    ///
    /// let query = SearchQuery { keyword: "a".to_string(), volume: "2025/2026".to_string() };
    /// let url = query.to_url(&SiteConfig::default()).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://kurser.dtu.dk/search?CourseCode=&SearchKeyword=a&CourseType=&TeachingLanguage=&Volume=2025%2F2026"
    /// );
    /// ```
    pub fn to_url(&self, site: &SiteConfig) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&site.base_url)?.join(&site.search_path)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("CourseCode", "")
            .append_pair("SearchKeyword", &self.keyword)
            .append_pair("CourseType", "")
            .append_pair("TeachingLanguage", "")
            .append_pair("Volume", &self.volume);
        Ok(url)
    }
}

/// Produces one query per alphabet character, in alphabet order
pub fn enumerate_queries(config: &CrawlerConfig) -> Vec<SearchQuery> {
    config
        .alphabet
        .chars()
        .map(|c| SearchQuery {
            keyword: c.to_string(),
            volume: config.volume.clone(),
        })
        .collect()
}
