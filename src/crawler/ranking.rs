//! Top-N word selection

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One entry of the popular-word ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Picks the `limit` most popular words
///
/// Ranking, most relevant first:
/// 1. Higher count
/// 2. Longer word (in characters)
/// 3. Lexicographically earlier word
///
/// Fewer than `limit` distinct words yields all of them; the result is never padded.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use word_crawler::crawler::popular_words;
///
/// let counts = HashMap::from([("cat".to_string(), 2), ("horse".to_string(), 2), ("ox".to_string(), 5)]);
/// let top: Vec<_> = popular_words(&counts, 2).into_iter().map(|w| w.word).collect();
/// assert_eq!(top, vec!["ox", "horse"]);
/// ```
pub fn popular_words(counts: &HashMap<String, u64>, limit: usize) -> Vec<WordCount> {
    let mut ranked: Vec<WordCount> = counts
        .iter()
        .map(|(word, count)| WordCount::new(word.clone(), *count))
        .collect();

    ranked.sort_by(compare_popularity);
    ranked.truncate(limit);
    ranked
}

fn compare_popularity(a: &WordCount, b: &WordCount) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.word.chars().count().cmp(&a.word.chars().count()))
        .then_with(|| a.word.cmp(&b.word))
}
