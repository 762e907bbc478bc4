//! Shared crawl state
//!
//! The visited set and the running word totals are the only state shared between crawl
//! tasks. Both are concurrent maps, so every operation here is safe to call from any
//! number of workers at once.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Race-free record of URLs already claimed for processing
#[derive(Debug, Default)]
pub struct VisitedTracker {
    urls: DashSet<String>,
}

impl VisitedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller
    ///
    /// Returns true for exactly one caller per URL; every later (or concurrent) caller gets
    /// false. Membership check and insert are a single operation.
    pub fn claim(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Running total of word counts across every visited page
#[derive(Debug, Default)]
pub struct WordAggregator {
    counts: DashMap<String, u64>,
}

impl WordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page's word counts into the total
    pub fn merge(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Copies the current totals out
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
