use crate::parser::{PageParser, ParsedPage};
use crate::ParseError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Page parser serving a fixed link graph from memory
///
/// Every call to [`PageParser::parse`] is recorded, including calls for unknown URLs,
/// which fail with [`ParseError::NotFound`].
///
/// # Example
///
/// ```
/// use word_crawler::parser::InMemoryPageParser;
///
/// let parser = InMemoryPageParser::new()
///     .with_page("http://a/", &[("hello", 2)], &["http://b/"])
///     .with_page("http://b/", &[("world", 1)], &["http://a/"]);
/// assert_eq!(parser.page_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPageParser {
    pages: HashMap<String, ParsedPage>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryPageParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the page served for `url`
    pub fn with_page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let page = ParsedPage {
            word_counts: words
                .iter()
                .map(|(word, count)| (word.to_string(), *count))
                .collect(),
            links: links.iter().map(|link| link.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Number of pages in the graph
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// URLs passed to `parse`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of times `url` was parsed
    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }
}

#[async_trait::async_trait]
impl PageParser for InMemoryPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, ParseError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ParseError::NotFound(url.to_string()))
    }
}
