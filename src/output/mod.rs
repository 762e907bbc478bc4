//! Output module for crawl results
//!
//! This module handles writing a [`CrawlResult`](crate::crawler::CrawlResult) as JSON, either
//! to a file or to any writer such as stdout.

mod json;

pub use json::{write_result, write_result_to_path};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
