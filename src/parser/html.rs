//! HTML page parser
//!
//! This module handles fetching a page and parsing its HTML to extract:
//! - Word counts from the visible text under `<body>`
//! - Links to follow (from `<a href>` tags)

use crate::config::{compile_patterns, matches_any, CrawlerConfig};
use crate::parser::{PageParser, ParsedPage};
use crate::ParseError;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Elements whose text is never counted
const SKIPPED_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Fetches pages over HTTP(S) or from disk and parses them as HTML
pub struct HtmlPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HtmlPageParser {
    /// Creates a parser from the crawl configuration
    ///
    /// The HTTP client times out after the crawl timeout (at least one second), and
    /// words matching `ignoredWords` are dropped.
    pub fn new(config: &CrawlerConfig) -> Result<Self, crate::CrawlerError> {
        let timeout = config.timeout().max(Duration::from_secs(1));
        let client = build_http_client(timeout)?;
        let ignored_words = compile_patterns(&config.ignored_words)?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    /// Creates a parser from an existing client and compiled word filters
    pub fn with_client(client: Client, ignored_words: Vec<Regex>) -> Self {
        Self {
            client,
            ignored_words,
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<String, ParseError> {
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !is_html(&content_type) {
            return Err(ParseError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_file(&self, url: &Url) -> Result<String, ParseError> {
        let path = url
            .to_file_path()
            .map_err(|_| ParseError::UnsupportedScheme(url.to_string()))?;
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

#[async_trait::async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, ParseError> {
        let base_url = Url::parse(url)?;

        let body = match base_url.scheme() {
            "http" | "https" => self.fetch_http(&base_url).await?,
            "file" => self.fetch_file(&base_url).await?,
            other => return Err(ParseError::UnsupportedScheme(other.to_string())),
        };

        Ok(parse_document(&body, &base_url, &self.ignored_words))
    }
}

/// Returns true if a `Content-Type` value names HTML, ignoring case and parameters
fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("text/html")
}

/// Builds the HTTP client used for page fetches
pub fn build_http_client(timeout: Duration) -> Result<Client, ParseError> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()?)
}

/// Parses HTML content into word counts and absolute links
///
/// # Word Extraction Rules
///
/// - Only text under `<body>` counts; `<script>`, `<style>` and `<noscript>` are skipped
/// - Text is split on every non-alphanumeric character and lowercased
/// - Words fully matching any `ignored_words` pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` resolving to `http`, `https` or `file`
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:`, `data:`, fragment-only links, and
/// `<a download>`
///
/// # Example
///
/// ```
/// use word_crawler::parser::parse_document;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello hello world</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_document(html, &base_url, &[]);
/// assert_eq!(page.word_counts["hello"], 2);
/// assert_eq!(page.links, vec!["https://example.com/next"]);
/// ```
pub fn parse_document(html: &str, base_url: &Url, ignored_words: &[Regex]) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: count_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts words in the visible body text
fn count_words(document: &Html, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return counts;
    };

    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| SKIPPED_ELEMENTS.contains(&parent.value().name()));
            if hidden {
                continue;
            }

            for word in text.split(|c: char| !c.is_alphanumeric()) {
                if word.is_empty() {
                    continue;
                }
                let word = word.to_lowercase();
                if matches_any(ignored_words, &word) {
                    continue;
                }
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Anything other than http, https or file after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
