//! Page parsing service
//!
//! The crawler only sees pages through the [`PageParser`] trait: give it a URL, get back the
//! words on that page and the links leaving it. Two implementations ship with the crate:
//!
//! - [`HtmlPageParser`]: fetches `http(s)://` and `file://` pages and tokenizes their HTML
//! - [`InMemoryPageParser`]: serves a link graph held in memory

mod html;
mod memory;

pub use html::{build_http_client, parse_document, HtmlPageParser};
pub use memory::InMemoryPageParser;

use crate::ParseError;
use std::collections::HashMap;

/// Words and outbound links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links, in document order
    pub links: Vec<String>,
}

/// Turns a URL into the words and links found on that page
#[async_trait::async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<ParsedPage, ParseError>;
}
