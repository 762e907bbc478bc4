//! Configuration module for Word-Crawler
//!
//! This module handles loading, parsing, and validating crawl configuration files.
//! A configuration that fails to load never reaches the crawler.
//!
//! # Example
//!
//! ```no_run
//! use word_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.json")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod patterns;
mod types;
mod validation;

// Re-export types
pub use types::{default_parallelism, CrawlStrategy, CrawlerConfig};

// Re-export parser functions
pub use parser::{load_config, read_config_json, read_config_toml};
pub use patterns::{compile_patterns, matches_any};
