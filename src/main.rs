//! Word-Crawler main entry point
//!
//! This is the command-line interface for the Word-Crawler word-frequency crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use word_crawler::config::{load_config, CrawlStrategy, CrawlerConfig};
use word_crawler::crawler::{build_crawler, WebCrawler};
use word_crawler::output::{write_result, write_result_to_path};
use word_crawler::{HtmlPageParser, Profiler, SystemClock};

/// Word-Crawler: counts the most popular words across a crawl
///
/// Crawls from the configured starting URLs up to a maximum depth and deadline,
/// then reports the most frequent words and the number of pages visited.
#[derive(Parser, Debug)]
#[command(name = "word-crawler")]
#[command(version)]
#[command(about = "A depth-bounded word-frequency crawler", long_about = None)]
struct Cli {
    /// Path to JSON or TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("word_crawler=info,warn"),
            1 => EnvFilter::new("word_crawler=debug,info"),
            2 => EnvFilter::new("word_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the result and profile
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &CrawlerConfig) {
    println!("=== Word-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Strategy: {:?}", config.strategy());
    println!("  Max depth: {}", config.max_depth);
    println!("  Timeout: {}s", config.timeout_seconds);
    println!("  Popular word count: {}", config.popular_word_count);
    println!("  Parallelism: {}", config.parallelism);

    println!("\nStarting URLs ({}):", config.starting_urls.len());
    for url in &config.starting_urls {
        println!("  - {}", url);
    }

    println!("\nIgnored URL patterns ({}):", config.ignored_urls.len());
    for pattern in &config.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", config.ignored_words.len());
    for pattern in &config.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    match &config.result_path {
        Some(path) => println!("  Result: {}", path.display()),
        None => println!("  Result: stdout"),
    }
    match &config.profile_output_path {
        Some(path) => println!("  Profile: {}", path.display()),
        None => println!("  Profile: stdout"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
fn handle_crawl(config: &CrawlerConfig) -> anyhow::Result<()> {
    let clock = Arc::new(SystemClock);
    let parser = Arc::new(HtmlPageParser::new(config).context("Failed to build page parser")?);
    let profiler = Arc::new(Profiler::new(clock.clone()));

    let crawler = profiler.wrap(build_crawler(config, parser, clock)?);

    if exceeds_worker_cap(config, crawler.max_parallelism()) {
        tracing::warn!(
            "Requested parallelism {} exceeds {}'s maximum of {}; capping",
            config.parallelism,
            crawler.name(),
            crawler.max_parallelism()
        );
    }

    let result = crawler
        .crawl(&config.starting_urls)
        .context("Crawl failed")?;
    tracing::info!(
        "Crawl completed: {} URLs visited, {} popular words",
        result.urls_visited,
        result.popular_words.len()
    );

    match &config.result_path {
        Some(path) => {
            write_result_to_path(&result, path)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            tracing::info!("Result written to {}", path.display());
        }
        None => write_result(&result, std::io::stdout().lock())?,
    }

    match &config.profile_output_path {
        Some(path) => {
            profiler
                .write_data_to_path(path)
                .with_context(|| format!("Failed to write profile to {}", path.display()))?;
            tracing::info!("Profile appended to {}", path.display());
        }
        None => profiler.write_data(&mut std::io::stdout().lock())?,
    }

    Ok(())
}

/// Returns true when the parallel strategy will run fewer workers than requested
fn exceeds_worker_cap(config: &CrawlerConfig, max_parallelism: usize) -> bool {
    config.strategy() == CrawlStrategy::Parallel && config.parallelism > max_parallelism
}
