//! Word-Crawler: a depth-bounded word-frequency crawler
//!
//! This crate crawls a graph of web pages from a set of seed URLs, counts the words on every
//! page it visits, and reports the most popular words together with the number of pages
//! visited. The crawl can run sequentially or on a bounded worker pool; both strategies
//! produce the same result.

pub mod clock;
pub mod config;
pub mod crawler;
pub mod output;
pub mod parser;
pub mod profiler;

use thiserror::Error;

/// Main error type for Word-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[source] std::io::Error),

    #[error("Page parser error: {0}")]
    Parser(#[from] ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while fetching or parsing a single page
///
/// These never end a crawl: the crawler logs them and treats the page as empty.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected HTML from {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("No page known for {0}")]
    NotFound(String),
}

/// Result type alias for Word-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for page parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{load_config, CrawlStrategy, CrawlerConfig};
pub use crawler::{
    build_crawler, CrawlResult, ParallelWebCrawler, SequentialWebCrawler, WebCrawler, WordCount,
};
pub use parser::{HtmlPageParser, InMemoryPageParser, PageParser, ParsedPage};
pub use profiler::{Profiled, Profiler};
