//! Fork-join crawl strategy on a bounded worker pool

use crate::clock::Clock;
use crate::config::{default_parallelism, CrawlerConfig};
use crate::crawler::task::{CrawlContext, CrawlSettings};
use crate::crawler::{outside_runtime, CrawlResult, WebCrawler};
use crate::parser::PageParser;
use crate::CrawlerError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Crawler that processes pages concurrently on a fixed number of worker threads
///
/// Each crawl task submits one child task per outbound link to the pool and does not
/// complete until all of its children have. The pool lives only for the duration of a
/// single [`WebCrawler::crawl`] call.
pub struct ParallelWebCrawler {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    workers: usize,
}

impl ParallelWebCrawler {
    pub fn new(
        config: &CrawlerConfig,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlerError> {
        Ok(Self::with_settings(
            CrawlSettings::from_config(config)?,
            config.parallelism,
            parser,
            clock,
        ))
    }

    /// Creates a crawler running at most `parallelism` workers
    ///
    /// The worker count is capped by the hardware thread count and is never below one.
    pub fn with_settings(
        settings: CrawlSettings,
        parallelism: usize,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let workers = parallelism.min(default_parallelism()).max(1);
        Self {
            settings,
            parser,
            clock,
            workers,
        }
    }

    /// Number of worker threads each crawl runs on
    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

impl ParallelWebCrawler {
    fn run(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        // Dropped on every return path, which stops the workers
        let pool = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.workers)
            .thread_name("crawl-worker")
            .enable_all()
            .build()
            .map_err(CrawlerError::WorkerPool)?;

        let ctx = Arc::new(CrawlContext::new(
            &self.settings,
            Arc::clone(&self.parser),
            Arc::clone(&self.clock),
        ));

        tracing::info!(
            "Starting parallel crawl of {} URLs on {} workers (max depth {})",
            starting_urls.len(),
            self.workers,
            self.settings.max_depth
        );

        pool.block_on(async {
            let mut seeds = JoinSet::new();
            for url in starting_urls {
                seeds.spawn(crawl_task(Arc::clone(&ctx), url.clone(), self.settings.max_depth));
            }
            join_all(seeds).await;
        });

        let result = ctx.finish(self.settings.popular_word_count);
        tracing::info!("Parallel crawl visited {} URLs", result.urls_visited);
        Ok(result)
    }
}

impl WebCrawler for ParallelWebCrawler {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        outside_runtime(|| self.run(starting_urls))
    }

    fn max_parallelism(&self) -> usize {
        default_parallelism()
    }

    fn name(&self) -> &'static str {
        "ParallelWebCrawler"
    }
}

fn crawl_task(
    ctx: Arc<CrawlContext>,
    url: String,
    remaining_depth: u32,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        let Some(links) = ctx.visit(&url, remaining_depth).await else {
            return;
        };

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(crawl_task(Arc::clone(&ctx), link, remaining_depth - 1));
        }
        join_all(children).await;
    })
}

/// Waits for every task in the set, re-raising a child's panic in the parent
async fn join_all(mut tasks: JoinSet<()>) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
            tracing::error!("Crawl task did not complete: {}", e);
        }
    }
}
