//! Single-threaded crawl strategy

use crate::clock::Clock;
use crate::config::CrawlerConfig;
use crate::crawler::task::{CrawlContext, CrawlSettings};
use crate::crawler::{outside_runtime, CrawlResult, WebCrawler};
use crate::parser::PageParser;
use crate::CrawlerError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Crawler that processes one page at a time
///
/// Child links are followed depth-first, in the order the parser returned them.
pub struct SequentialWebCrawler {
    settings: CrawlSettings,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

impl SequentialWebCrawler {
    pub fn new(
        config: &CrawlerConfig,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlerError> {
        Ok(Self::with_settings(
            CrawlSettings::from_config(config)?,
            parser,
            clock,
        ))
    }

    pub fn with_settings(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            parser,
            clock,
        }
    }
}

impl SequentialWebCrawler {
    fn run(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CrawlerError::WorkerPool)?;

        let ctx = CrawlContext::new(&self.settings, Arc::clone(&self.parser), Arc::clone(&self.clock));

        tracing::info!(
            "Starting sequential crawl of {} URLs (max depth {})",
            starting_urls.len(),
            self.settings.max_depth
        );

        runtime.block_on(async {
            for url in starting_urls {
                crawl_internal(&ctx, url.clone(), self.settings.max_depth).await;
            }
        });

        let result = ctx.finish(self.settings.popular_word_count);
        tracing::info!("Sequential crawl visited {} URLs", result.urls_visited);
        Ok(result)
    }
}

impl WebCrawler for SequentialWebCrawler {
    fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        outside_runtime(|| self.run(starting_urls))
    }

    fn name(&self) -> &'static str {
        "SequentialWebCrawler"
    }
}

fn crawl_internal<'a>(
    ctx: &'a CrawlContext,
    url: String,
    remaining_depth: u32,
) -> Pin<Box<dyn Future<Output = ()> + 'a>> {
    Box::pin(async move {
        let Some(links) = ctx.visit(&url, remaining_depth).await else {
            return;
        };

        for link in links {
            crawl_internal(ctx, link, remaining_depth - 1).await;
        }
    })
}
