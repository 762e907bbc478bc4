//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the real HTML parser.

use std::sync::Arc;
use std::time::Duration;
use word_crawler::config::{compile_patterns, CrawlStrategy, CrawlerConfig};
use word_crawler::crawler::{build_crawler, CrawlResult, CrawlSettings, WordCount};
use word_crawler::parser::build_http_client;
use word_crawler::{
    load_config, HtmlPageParser, ParallelWebCrawler, Profiler, SequentialWebCrawler, SystemClock,
    WebCrawler,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `seeds`
fn create_test_config(seeds: Vec<String>, ignored_urls: Vec<String>) -> CrawlerConfig {
    CrawlerConfig {
        starting_urls: seeds,
        max_depth: 10,
        timeout_seconds: 30,
        popular_word_count: 3,
        ignored_urls,
        ignored_words: vec!["^.{1,2}$".to_string()],
        parallelism: 2,
        implementation_override: None,
        profile_output_path: None,
        result_path: None,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>ignored title</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

/// Mounts a three-page site:
///
/// `/` links to `/page1` and `/page2`; `/page1` links back to `/` and to `/private`.
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>rust crawler rust</p>
            <a href="/page1">one</a>
            <a href="/page2">two</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(
            r#"<p>rust tokio</p>
            <script>var hidden = "javascript";</script>
            <a href="/">home</a>
            <a href="/private">secret</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page("<p>crawler tokio of</p>"))
        .mount(server)
        .await;
}

/// Runs a crawl off the async test runtime, since each crawl owns its own runtime
async fn run_crawl(crawler: Box<dyn WebCrawler>, seeds: Vec<String>) -> CrawlResult {
    tokio::task::spawn_blocking(move || crawler.crawl(&seeds))
        .await
        .expect("crawl task panicked")
        .expect("crawl failed")
}

fn crawler_for(config: &CrawlerConfig) -> Box<dyn WebCrawler> {
    let parser = Arc::new(HtmlPageParser::new(config).expect("Failed to create parser"));
    build_crawler(config, parser, Arc::new(SystemClock)).expect("Failed to create crawler")
}

#[tokio::test]
async fn test_full_crawl_sequential() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(html_page("<p>never counted</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let mut config = create_test_config(
        vec![format!("{}/", base_url)],
        vec![".*/private".to_string()],
    );
    config.implementation_override = Some(CrawlStrategy::Sequential);

    let crawler = crawler_for(&config);
    assert_eq!(crawler.name(), "SequentialWebCrawler");

    let result = run_crawl(crawler, config.starting_urls.clone()).await;

    assert_eq!(result.urls_visited, 3);
    assert_eq!(
        result.popular_words,
        vec![
            WordCount::new("rust", 3),
            WordCount::new("crawler", 2),
            WordCount::new("tokio", 2),
        ]
    );
}

#[tokio::test]
async fn test_full_crawl_parallel_matches_sequential() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let base_url = mock_server.uri();
    let seeds = vec![format!("{}/", base_url)];
    let ignored = vec![".*/private".to_string()];

    let mut sequential_config = create_test_config(seeds.clone(), ignored.clone());
    sequential_config.implementation_override = Some(CrawlStrategy::Sequential);
    let sequential = run_crawl(crawler_for(&sequential_config), seeds.clone()).await;

    let parallel_config = create_test_config(seeds.clone(), ignored);
    let crawler = crawler_for(&parallel_config);
    assert_eq!(crawler.name(), "ParallelWebCrawler");
    let parallel = run_crawl(crawler, seeds).await;

    assert_eq!(parallel, sequential);
}

#[tokio::test]
async fn test_missing_page_counts_as_visited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>survivor</p><a href="/gone">a</a><a href="/data.json">b</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"word\": 1}", "application/json"))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let config = create_test_config(vec![format!("{}/", base_url)], vec![]);

    let result = run_crawl(crawler_for(&config), config.starting_urls.clone()).await;

    assert_eq!(result.urls_visited, 3);
    assert_eq!(result.popular_words, vec![WordCount::new("survivor", 1)]);
}

#[tokio::test]
async fn test_depth_one_fetches_only_seeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<p>seed</p><a href="/child">go</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/child"))
        .respond_with(html_page("<p>child</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let mut config = create_test_config(vec![format!("{}/", base_url)], vec![]);
    config.max_depth = 1;

    let result = run_crawl(crawler_for(&config), config.starting_urls.clone()).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(result.popular_words, vec![WordCount::new("seed", 1)]);
}

#[tokio::test]
async fn test_file_site_crawl() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("index.html"),
        r#"<html><body><p>local pages local</p><a href="about.html">about</a></body></html>"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("about.html"),
        r#"<html><body><p>about local</p><a href="index.html">back</a></body></html>"#,
    )
    .unwrap();

    let seed = url::Url::from_file_path(dir.path().join("index.html"))
        .unwrap()
        .to_string();
    let config = create_test_config(vec![seed], vec![]);

    let result = run_crawl(crawler_for(&config), config.starting_urls.clone()).await;

    assert_eq!(result.urls_visited, 2);
    assert_eq!(result.popular_words[0], WordCount::new("local", 3));
}

#[tokio::test]
async fn test_strategies_share_parser_client() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let base_url = mock_server.uri();
    let seeds = vec![format!("{}/", base_url)];
    let settings = CrawlSettings {
        max_depth: 10,
        timeout: Duration::from_secs(30),
        popular_word_count: 1,
        ignored_urls: compile_patterns(&[".*/private".to_string()]).unwrap().into(),
    };

    let client = build_http_client(Duration::from_secs(5)).unwrap();
    let parser = Arc::new(HtmlPageParser::with_client(client, vec![]));
    let clock = Arc::new(SystemClock);

    let sequential: Box<dyn WebCrawler> = Box::new(SequentialWebCrawler::with_settings(
        settings.clone(),
        parser.clone(),
        clock.clone(),
    ));
    let parallel: Box<dyn WebCrawler> = Box::new(ParallelWebCrawler::with_settings(
        settings, 4, parser, clock,
    ));

    let first = run_crawl(sequential, seeds.clone()).await;
    let second = run_crawl(parallel, seeds).await;

    assert_eq!(first.popular_words, vec![WordCount::new("rust", 3)]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_config_file_to_profiled_result() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("crawl.json");
    let profile_path = dir.path().join("profile.txt");
    let config_json = serde_json::json!({
        "startPages": [format!("{}/", mock_server.uri())],
        "ignoredUrls": [".*/private"],
        "ignoredWords": ["^.{1,2}$"],
        "parallelism": 1,
        "timeoutSeconds": 30,
        "popularWordCount": 2,
        "maxDepth": 5,
        "profileOutputPath": profile_path,
    });
    std::fs::write(&config_path, config_json.to_string()).unwrap();

    let config = load_config(&config_path).expect("Failed to load config");
    let clock = Arc::new(SystemClock);
    let profiler = Arc::new(Profiler::new(clock.clone()));
    let parser = Arc::new(HtmlPageParser::new(&config).unwrap());
    let crawler: Box<dyn WebCrawler> =
        Box::new(profiler.wrap(build_crawler(&config, parser, clock).unwrap()));

    let result = run_crawl(crawler, config.starting_urls.clone()).await;
    assert_eq!(result.urls_visited, 3);
    assert_eq!(
        result.popular_words,
        vec![WordCount::new("rust", 3), WordCount::new("crawler", 2)]
    );

    profiler
        .write_data_to_path(config.profile_output_path.as_deref().unwrap())
        .unwrap();
    let profile = std::fs::read_to_string(&profile_path).unwrap();
    assert!(profile.starts_with("Run at "));
    assert!(profile.contains("SequentialWebCrawler#crawl took "));
}

#[tokio::test]
async fn test_mixed_case_html_content_type_is_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><p>shouting header</p></body></html>",
            "Text/HTML; charset=UTF-8",
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", mock_server.uri())], vec![]);

    let result = run_crawl(crawler_for(&config), config.starting_urls.clone()).await;

    assert_eq!(result.urls_visited, 1);
    assert_eq!(
        result.popular_words,
        vec![WordCount::new("shouting", 1), WordCount::new("header", 1)]
    );
}
