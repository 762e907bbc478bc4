//! Timing of crawl calls
//!
//! [`Profiler::wrap`] decorates a crawler so that every `crawl` call is timed with the
//! injected [`Clock`]. Repeated calls to the same crawler accumulate.

use crate::clock::Clock;
use crate::crawler::{CrawlResult, WebCrawler};
use crate::CrawlerError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Collects elapsed time per profiled method
pub struct Profiler {
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    data: Mutex<BTreeMap<String, Duration>>,
}

impl Profiler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: Utc::now(),
            data: Mutex::new(BTreeMap::new()),
        }
    }

    /// Wraps `crawler` so its `crawl` calls are recorded by this profiler
    pub fn wrap<C: WebCrawler>(self: &Arc<Self>, crawler: C) -> Profiled<C> {
        Profiled {
            inner: crawler,
            profiler: Arc::clone(self),
        }
    }

    /// Adds `elapsed` to the total recorded for `method`
    pub fn record(&self, method: &str, elapsed: Duration) {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        *data.entry(method.to_string()).or_default() += elapsed;
    }

    /// Total time recorded for `method`, if it was ever called
    pub fn elapsed(&self, method: &str) -> Option<Duration> {
        self.data
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(method)
            .copied()
    }

    /// Writes the collected timings
    ///
    /// ```text
    /// Run at Mon, 19 Oct 2026 10:00:00 +0000
    /// ParallelWebCrawler#crawl took 0m 2s 150ms
    /// ```
    pub fn write_data<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;

        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        for (method, elapsed) in data.iter() {
            writeln!(writer, "{} took {}", method, format_duration(*elapsed))?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Appends the collected timings to the file at `path`
    pub fn write_data_to_path(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_data(&mut file)?;
        file.flush()
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        duration.subsec_millis()
    )
}

/// Crawler decorated with timing
pub struct Profiled<C> {
    inner: C,
    profiler: Arc<Profiler>,
}

impl<C: WebCrawler> WebCrawler for Profiled<C> {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        let start = self.profiler.clock.now();
        let result = self.inner.crawl(starting_urls);
        let elapsed = self.profiler.clock.now().saturating_duration_since(start);

        self.profiler
            .record(&format!("{}#crawl", self.inner.name()), elapsed);
        result
    }

    fn max_parallelism(&self) -> usize {
        self.inner.max_parallelism()
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::crawler::WordCount;

    /// Crawler that takes a fixed amount of fake time
    struct TimedCrawler {
        clock: Arc<FakeClock>,
        takes: Duration,
        fail: bool,
    }

    impl WebCrawler for TimedCrawler {
        fn crawl(&self, _starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
            self.clock.advance(self.takes);
            if self.fail {
                return Err(CrawlerError::WorkerPool(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "no threads",
                )));
            }
            Ok(CrawlResult {
                popular_words: vec![WordCount::new("timed", 1)],
                urls_visited: 1,
            })
        }

        fn max_parallelism(&self) -> usize {
            3
        }

        fn name(&self) -> &'static str {
            "TimedCrawler"
        }
    }

    fn setup(takes: Duration, fail: bool) -> (Arc<Profiler>, Profiled<TimedCrawler>) {
        let clock = Arc::new(FakeClock::new());
        let profiler = Arc::new(Profiler::new(clock.clone()));
        let crawler = profiler.wrap(TimedCrawler {
            clock,
            takes,
            fail,
        });
        (profiler, crawler)
    }

    #[test]
    fn test_records_crawl_time() {
        let (profiler, crawler) = setup(Duration::from_millis(1500), false);

        let result = crawler.crawl(&[]).unwrap();

        assert_eq!(result.urls_visited, 1);
        assert_eq!(
            profiler.elapsed("TimedCrawler#crawl"),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_repeated_calls_accumulate() {
        let (profiler, crawler) = setup(Duration::from_secs(2), false);

        crawler.crawl(&[]).unwrap();
        crawler.crawl(&[]).unwrap();

        assert_eq!(
            profiler.elapsed("TimedCrawler#crawl"),
            Some(Duration::from_secs(4))
        );
    }

    #[test]
    fn test_failed_call_is_still_recorded() {
        let (profiler, crawler) = setup(Duration::from_secs(1), true);

        assert!(crawler.crawl(&[]).is_err());
        assert_eq!(
            profiler.elapsed("TimedCrawler#crawl"),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_delegates_other_methods_without_recording() {
        let (profiler, crawler) = setup(Duration::from_secs(1), false);

        assert_eq!(crawler.max_parallelism(), 3);
        assert_eq!(crawler.name(), "TimedCrawler");
        assert_eq!(profiler.elapsed("TimedCrawler#crawl"), None);
    }

    #[test]
    fn test_write_data_format() {
        let (profiler, crawler) = setup(Duration::from_millis(61_250), false);
        crawler.crawl(&[]).unwrap();

        let mut out = Vec::new();
        profiler.write_data(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Run at "));
        assert_eq!(lines[1], "TimedCrawler#crawl took 1m 1s 250ms");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_write_data_to_path_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.txt");
        let (profiler, crawler) = setup(Duration::from_secs(1), false);
        crawler.crawl(&[]).unwrap();

        profiler.write_data_to_path(&path).unwrap();
        profiler.write_data_to_path(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("Run at ").count(), 2);
        assert_eq!(text.matches("TimedCrawler#crawl took 0m 1s 0ms").count(), 2);
    }
}
