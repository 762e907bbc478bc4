//! Crawler module for depth-bounded word-frequency crawls
//!
//! This module contains the core crawling logic, including:
//! - The per-URL crawl step shared by both strategies
//! - Race-free visited tracking and word-count aggregation
//! - Sequential and parallel (fork-join) scheduling
//! - Top-N popular word selection

mod parallel;
mod ranking;
mod sequential;
mod state;
mod task;

pub use parallel::ParallelWebCrawler;
pub use ranking::{popular_words, WordCount};
pub use sequential::SequentialWebCrawler;
pub use state::{VisitedTracker, WordAggregator};
pub use task::CrawlSettings;

use crate::clock::Clock;
use crate::config::{CrawlStrategy, CrawlerConfig};
use crate::parser::PageParser;
use crate::CrawlerError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, most relevant first
    pub popular_words: Vec<WordCount>,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

/// A crawl strategy
pub trait WebCrawler: Send + Sync {
    /// Crawls from `starting_urls` and returns the aggregated result
    ///
    /// Pages that fail to parse are counted as visited but contribute nothing; only a
    /// failure to start the crawl itself is returned as an error.
    ///
    /// This call blocks until the crawl finishes. Each crawl runs on a tokio runtime of its
    /// own; when called from inside another runtime (a `#[tokio::main]` binary, a
    /// `#[tokio::test]`, a `spawn_blocking` closure) that runtime is driven from a dedicated
    /// thread, and the calling thread is blocked for the duration.
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError>;

    /// Largest number of workers this crawler can use
    fn max_parallelism(&self) -> usize {
        1
    }

    /// Name used to label profiling data
    fn name(&self) -> &'static str;
}

impl<C: WebCrawler + ?Sized> WebCrawler for Box<C> {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        (**self).crawl(starting_urls)
    }

    fn max_parallelism(&self) -> usize {
        (**self).max_parallelism()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Runs `crawl` on a thread that is outside any tokio runtime
///
/// A runtime cannot be started from within another one, so inside a tokio context the
/// crawl moves to a scoped `crawl-driver` thread. A panic on that thread is re-raised here.
pub(crate) fn outside_runtime<F>(crawl: F) -> Result<CrawlResult, CrawlerError>
where
    F: FnOnce() -> Result<CrawlResult, CrawlerError> + Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return crawl();
    }

    tracing::debug!("Called inside a tokio runtime; driving the crawl from a new thread");
    std::thread::scope(|scope| {
        let driver = std::thread::Builder::new()
            .name("crawl-driver".to_string())
            .spawn_scoped(scope, crawl)
            .map_err(CrawlerError::WorkerPool)?;
        driver
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    })
}

/// Builds the crawler the configuration selects
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use word_crawler::config::load_config;
/// use word_crawler::crawler::build_crawler;
/// use word_crawler::{HtmlPageParser, SystemClock};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawl.json"))?;
/// let parser = Arc::new(HtmlPageParser::new(&config)?);
/// let crawler = build_crawler(&config, parser, Arc::new(SystemClock))?;
/// let result = crawler.crawl(&config.starting_urls)?;
/// println!("Visited {} URLs", result.urls_visited);
/// # Ok(())
/// # }
/// ```
pub fn build_crawler(
    config: &CrawlerConfig,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
) -> Result<Box<dyn WebCrawler>, CrawlerError> {
    let crawler: Box<dyn WebCrawler> = match config.strategy() {
        CrawlStrategy::Sequential => Box::new(SequentialWebCrawler::new(config, parser, clock)?),
        CrawlStrategy::Parallel => Box::new(ParallelWebCrawler::new(config, parser, clock)?),
    };

    tracing::debug!("Selected {}", crawler.name());
    Ok(crawler)
}
