//! Per-URL crawl step shared by both strategies
//!
//! [`CrawlContext::visit`] decides whether a URL is processed and, if so, parses it and
//! merges its words. The strategies differ only in how they run the child tasks for the
//! links it returns.

use crate::clock::{Clock, Deadline};
use crate::config::{compile_patterns, matches_any, CrawlerConfig};
use crate::crawler::ranking::popular_words;
use crate::crawler::state::{VisitedTracker, WordAggregator};
use crate::crawler::CrawlResult;
use crate::parser::{PageParser, ParsedPage};
use crate::ConfigError;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Crawl parameters fixed for the lifetime of a crawler
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub max_depth: u32,
    pub timeout: Duration,
    pub popular_word_count: usize,
    pub ignored_urls: Arc<[Regex]>,
}

impl CrawlSettings {
    /// Extracts crawl parameters from the configuration, compiling the URL filters
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            max_depth: config.max_depth,
            timeout: config.timeout(),
            popular_word_count: config.popular_word_count,
            ignored_urls: compile_patterns(&config.ignored_urls)?.into(),
        })
    }
}

/// Everything one crawl invocation shares between its tasks
pub(crate) struct CrawlContext {
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    ignored_urls: Arc<[Regex]>,
    deadline: Deadline,
    visited: VisitedTracker,
    counts: WordAggregator,
}

impl CrawlContext {
    /// Starts a crawl: fixes the deadline and creates empty shared state
    pub fn new(
        settings: &CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let deadline = Deadline::after(clock.as_ref(), settings.timeout);
        Self {
            parser,
            clock,
            ignored_urls: Arc::clone(&settings.ignored_urls),
            deadline,
            visited: VisitedTracker::new(),
            counts: WordAggregator::new(),
        }
    }

    /// Processes `url` if it should be, returning the links to descend into
    ///
    /// Returns `None` when the task stops without doing work: depth exhausted, deadline
    /// reached, URL ignored, or URL already claimed. A page that fails to parse counts as
    /// visited but contributes no words and no links.
    pub async fn visit(&self, url: &str, remaining_depth: u32) -> Option<Vec<String>> {
        if remaining_depth == 0 {
            tracing::trace!("Depth exhausted at {}", url);
            return None;
        }

        if self.deadline.has_passed(self.clock.now()) {
            tracing::trace!("Deadline reached, skipping {}", url);
            return None;
        }

        if matches_any(&self.ignored_urls, url) {
            tracing::trace!("Ignoring {}", url);
            return None;
        }

        if !self.visited.claim(url) {
            tracing::trace!("Already visited {}", url);
            return None;
        }

        tracing::debug!("Visiting {} (remaining depth {})", url, remaining_depth);

        let page = match self.parser.parse(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", url, e);
                ParsedPage::default()
            }
        };

        self.counts.merge(&page.word_counts);
        Some(page.links)
    }

    /// Derives the crawl result once every task has finished
    pub fn finish(&self, popular_word_count: usize) -> CrawlResult {
        CrawlResult {
            popular_words: popular_words(&self.counts.snapshot(), popular_word_count),
            urls_visited: self.visited.len(),
        }
    }
}
