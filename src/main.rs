//! Course-Harvest main entry point
//!
//! This is the command-line interface for the course catalog harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use course_harvest::config::{load_config_with_hash, Config};
use course_harvest::crawler::{crawl, enumerate_queries};
use course_harvest::output::{print_statistics, write_crawl_output, CrawlOutput};
use course_harvest::upload::{upload_catalog, Credentials, RestTableClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Course-Harvest: a course catalog harvester
///
/// Sweeps a university course search one keyword character at a time,
/// deduplicates the courses it finds, and upserts them into a remote table.
#[derive(Parser, Debug)]
#[command(name = "course-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvest a university course catalog", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the search pages and write the catalog
    Crawl {
        /// Academic-year/term to sweep (e.g. 2025/2026)
        #[arg(long)]
        volume: Option<String>,

        /// Where to write the JSON catalog
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Show the queries that would be issued without crawling
        #[arg(long)]
        dry_run: bool,
    },

    /// Upsert a catalog file into the remote table
    Upload {
        /// Project URL (overrides SUPABASE_URL)
        #[arg(long)]
        url: Option<String>,

        /// Service role key (overrides SUPABASE_SERVICE_ROLE)
        #[arg(long)]
        key: Option<String>,

        /// Catalog file to upload
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Crawl {
            volume,
            output,
            dry_run,
        } => {
            if let Some(volume) = volume {
                config.crawler.volume = volume;
            }
            if let Some(output) = output {
                config.output.catalog_path = output.to_string_lossy().into_owned();
            }
            course_harvest::config::validate(&config)?;

            if dry_run {
                handle_dry_run(&config)
            } else {
                handle_crawl(config).await
            }
        }
        Command::Upload { url, key, file } => {
            if let Some(file) = file {
                config.output.catalog_path = file.to_string_lossy().into_owned();
            }
            course_harvest::config::validate(&config)?;
            handle_upload(config, url, key).await
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("course_harvest=info,warn"),
            1 => EnvFilter::new("course_harvest=debug,info"),
            2 => EnvFilter::new("course_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `crawl --dry-run`: shows what would be requested
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Course-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Search path: {}", config.site.search_path);
    println!("  User agent: {}", config.site.user_agent);
    println!("  Accept-Language: {}", config.site.accept_language);
    println!("  Timeout: {}s", config.site.timeout_secs);

    println!("\nCrawler:");
    println!("  Volume: {}", config.crawler.volume);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Max pages per query: {}", config.crawler.max_pages_per_query);

    println!("\nOutput:");
    println!("  Catalog: {}", config.output.catalog_path);
    println!("  Diagnostic: {}", config.output.diagnostic_path);

    let queries = enumerate_queries(&config.crawler);
    println!("\nQueries ({}):", queries.len());
    for query in &queries {
        println!("  - {}", query.to_url(&config.site)?);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the crawl and writes its artifact
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let volume = config.crawler.volume.clone();
    let output_config = config.output.clone();

    let report = crawl(config).await.context("Crawl failed")?;

    match write_crawl_output(&report, &volume, &output_config)? {
        CrawlOutput::Catalog { path, count } => {
            println!("Saved {} unique courses to {}", count, path.display());
        }
        CrawlOutput::Diagnostic { path } => {
            println!("No courses parsed; wrote {}", path.display());
        }
    }

    print_statistics(&report.stats);
    Ok(())
}

/// Handles the upload of an existing catalog file
async fn handle_upload(
    config: Config,
    url: Option<String>,
    key: Option<String>,
) -> anyhow::Result<()> {
    let credentials = Credentials::resolve(url, key)?;
    let client = RestTableClient::new(&credentials)?;
    println!("Connecting to: {}", credentials.url);

    let catalog_path = PathBuf::from(&config.output.catalog_path);
    let summary = upload_catalog(&client, &catalog_path, &config.upload).await?;

    println!(
        "Done. Uploaded/updated approximately {} rows in {} batches.",
        summary.reported_rows(),
        summary.batches
    );
    Ok(())
}
