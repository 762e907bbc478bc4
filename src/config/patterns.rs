use crate::ConfigError;
use regex::Regex;

/// Compiles patterns that must match a whole string
///
/// Each pattern is wrapped as `^(?:pattern)$`, so `"http://a/.*"` matches
/// `"http://a/x"` but `"a"` does not match `"http://a/"`.
///
/// # Examples
///
/// ```
/// use word_crawler::config::{compile_patterns, matches_any};
///
/// let patterns = compile_patterns(&["https://example\\.com/admin.*".to_string()]).unwrap();
/// assert!(matches_any(&patterns, "https://example.com/admin/users"));
/// assert!(!matches_any(&patterns, "https://example.com/"));
/// ```
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                ConfigError::InvalidPattern(format!("'{}': {}", pattern, e))
            })
        })
        .collect()
}

/// Returns true if `candidate` fully matches any of the compiled patterns
pub fn matches_any(patterns: &[Regex], candidate: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(candidate))
}
