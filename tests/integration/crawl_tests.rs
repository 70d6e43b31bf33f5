//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the course search and run the
//! full crawl cycle end-to-end.

use course_harvest::config::{Config, CrawlerConfig, OutputConfig, SiteConfig, UploadConfig};
use course_harvest::crawler::{crawl, Coordinator};
use course_harvest::output::{write_crawl_output, CrawlOutput, NO_RESULTS_MESSAGE};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, alphabet: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", base_url),
            search_path: "search".to_string(),
            user_agent: "HarvestTest/1.0".to_string(),
            accept_language: "en".to_string(),
            timeout_secs: 5,
        },
        crawler: CrawlerConfig {
            volume: "2025/2026".to_string(),
            alphabet: alphabet.to_string(),
            request_delay_ms: 0,
            max_pages_per_query: 10,
        },
        output: OutputConfig::default(),
        upload: UploadConfig::default(),
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn table(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(code, title)| format!("<tr><td>{}</td><td>{}</td></tr>", code, title))
        .collect();
    format!("<table><tbody>{}</tbody></table>", rows)
}

fn codes(records: &[course_harvest::CourseRecord]) -> Vec<&str> {
    records.iter().map(|r| r.code.as_str()).collect()
}

#[tokio::test]
async fn test_single_page_single_keyword() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("SearchKeyword", "a"))
        .and(query_param("Volume", "2025/2026"))
        .and(query_param("CourseCode", ""))
        .respond_with(html_page(&table(&[
            ("10101", "Intro to Systems"),
            ("20202", "Advanced Topics"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "a");
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].code, "10101");
    assert_eq!(report.records[0].title, "Intro to Systems");
    assert_eq!(report.records[1].code, "20202");
    assert_eq!(report.records[1].title, "Advanced Topics");
    assert_eq!(report.stats.pages_fetched, 1);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_identity_headers_sent() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "HarvestTest/1.0"))
        .and(header("referer", base_url.as_str()))
        .and(header("accept-language", "en"))
        .respond_with(html_page(&table(&[("10101", "Intro to Systems")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "a");
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(codes(&report.records), vec!["10101"]);
}

#[tokio::test]
async fn test_server_error_only_affects_its_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("SearchKeyword", "a"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("SearchKeyword", "b"))
        .respond_with(html_page(&table(&[("30303", "Compilers")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let config = create_test_config(&mock_server.uri(), "ab");
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(codes(&report.records), vec!["30303"]);
    assert_eq!(report.stats.queries_run, 2);
    assert_eq!(report.stats.fetch_failures, 1);
    assert_eq!(report.stats.pages_fetched, 1);

    let failing_url = format!("{}/search?CourseCode=&SearchKeyword=a", mock_server.uri());
    let output = logs.contents();
    let warning = output
        .lines()
        .find(|line| line.contains("HTTP 500 on"))
        .expect("no warning logged for the failed fetch");
    assert!(warning.contains("WARN"));
    assert!(warning.contains(&failing_url));
    assert!(!output.contains("SearchKeyword=b&"));
}

#[tokio::test]
async fn test_pagination_and_dedup_across_queries() {
    let mock_server = MockServer::start().await;

    // Query "a": two pages, linked by rel=next with a relative href
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("SearchKeyword", "a"))
        .respond_with(html_page(&format!(
            r#"{}<a rel="next" href="/results/a/2">2</a>"#,
            table(&[("10101", "Intro to Systems"), ("20202", "Advanced Topics")])
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/results/a/2"))
        .respond_with(html_page(&table(&[("30303", "Compilers")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Query "b": overlaps with "a" and uses a text marker for its next page
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("SearchKeyword", "b"))
        .respond_with(html_page(&format!(
            r#"{}<a href="/results/b/2">Next</a>"#,
            table(&[("20202", "Advanced Topics (renamed)"), ("40404", "Databases")])
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Second page of "b" only has the anchor shape
    Mock::given(method("GET"))
        .and(path("/results/b/2"))
        .respond_with(html_page(concat!(
            r#"<a href="/course/50505">50505 - Networks</a>"#,
            r#"<a href="/course/10101">10101 - Intro</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "ab");
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(
        codes(&report.records),
        vec!["10101", "20202", "30303", "40404", "50505"]
    );
    assert_eq!(report.records[1].title, "Advanced Topics");
    assert_eq!(report.records[0].title, "Intro to Systems");
    assert_eq!(report.stats.pages_fetched, 4);
    assert_eq!(report.stats.records_seen, 7);
    assert_eq!(report.stats.duplicates_skipped, 2);
}

#[tokio::test]
async fn test_failure_mid_chain_keeps_earlier_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page(&format!(
            r#"{}<a href="/broken">›</a>"#,
            table(&[("10101", "Intro to Systems")])
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "a");
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(codes(&report.records), vec!["10101"]);
    assert_eq!(report.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_self_referencing_next_link_stops() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(html_page(&format!(
            r#"{}<a rel="next" href="/loop">again</a>"#,
            table(&[("20202", "Advanced Topics")])
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page(&format!(
            r#"{}<a rel="next" href="/loop">2</a>"#,
            table(&[("10101", "Intro to Systems")])
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "a");
    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(codes(&report.records), vec!["10101", "20202"]);
    assert_eq!(report.stats.chains_cut, 1);
}

#[tokio::test]
async fn test_page_cap_limits_chain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page(r#"<a href="/page/2">Next</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page/2"))
        .respond_with(html_page(r#"<a href="/page/3">Next</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page/3"))
        .respond_with(html_page(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), "a");
    config.crawler.max_pages_per_query = 2;
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.chains_cut, 1);
}

#[tokio::test]
async fn test_zero_results_writes_diagnostic_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page("<p>Your search returned no courses.</p>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), "xy");
    config.output = OutputConfig {
        catalog_path: dir.path().join("courses.json").to_string_lossy().into_owned(),
        diagnostic_path: dir.path().join("debug.txt").to_string_lossy().into_owned(),
    };
    let output_config = config.output.clone();

    let report = crawl(config).await.expect("Crawl failed");
    assert!(report.records.is_empty());

    let output = write_crawl_output(&report, "2025/2026", &output_config)
        .expect("Failed to write output");
    assert!(matches!(output, CrawlOutput::Diagnostic { .. }));

    let diagnostic = std::fs::read_to_string(dir.path().join("debug.txt")).unwrap();
    assert!(diagnostic.starts_with(NO_RESULTS_MESSAGE));
    assert!(!dir.path().join("courses.json").exists());
}

#[tokio::test]
async fn test_results_write_catalog() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html_page(&table(&[("01035", "Matematik 2 – Grundlæggende")])))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&mock_server.uri(), "m");
    config.output = OutputConfig {
        catalog_path: dir.path().join("courses.json").to_string_lossy().into_owned(),
        diagnostic_path: dir.path().join("debug.txt").to_string_lossy().into_owned(),
    };
    let output_config = config.output.clone();

    let report = crawl(config).await.expect("Crawl failed");
    let output = write_crawl_output(&report, "2025/2026", &output_config)
        .expect("Failed to write output");

    assert!(matches!(output, CrawlOutput::Catalog { count: 1, .. }));
    let json = std::fs::read_to_string(dir.path().join("courses.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"code": "01035", "title": "Matematik 2 – Grundlæggende"}])
    );
    assert!(json.contains("Grundlæggende"));
    assert!(!dir.path().join("debug.txt").exists());
}
