use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Word-Crawler
///
/// Keys are camelCase in both JSON and TOML files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// URLs the crawl starts from, in order
    #[serde(alias = "startPages")]
    pub starting_urls: Vec<String>,

    /// Maximum number of links followed from a starting URL (0 visits nothing)
    pub max_depth: u32,

    /// Seconds after crawl start at which no new page is processed
    pub timeout_seconds: u64,

    /// Number of words reported in the result
    pub popular_word_count: usize,

    /// Regular expressions; a URL fully matching any of them is never visited
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word fully matching any of them is not counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Requested number of crawl workers
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Forces a crawl strategy regardless of `parallelism`
    #[serde(default)]
    pub implementation_override: Option<CrawlStrategy>,

    /// File the profiler output is appended to (stdout when absent)
    #[serde(default)]
    pub profile_output_path: Option<PathBuf>,

    /// File the crawl result is written to (stdout when absent)
    #[serde(default)]
    pub result_path: Option<PathBuf>,
}

impl CrawlerConfig {
    /// Returns the crawl timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the strategy this configuration selects
    ///
    /// An explicit override wins; otherwise a parallelism of one runs sequentially.
    pub fn strategy(&self) -> CrawlStrategy {
        match self.implementation_override {
            Some(strategy) => strategy,
            None if self.parallelism <= 1 => CrawlStrategy::Sequential,
            None => CrawlStrategy::Parallel,
        }
    }
}

/// Crawl scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStrategy {
    Sequential,
    Parallel,
}

/// Hardware thread count, falling back to one when it cannot be determined
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
