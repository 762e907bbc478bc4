use crate::crawler::CrawlResult;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the crawl result as pretty-printed JSON
///
/// # Example
///
/// ```
/// use word_crawler::crawler::{CrawlResult, WordCount};
/// use word_crawler::output::write_result;
///
/// let result = CrawlResult {
///     popular_words: vec![WordCount::new("rust", 4)],
///     urls_visited: 2,
/// };
/// let mut out = Vec::new();
/// write_result(&result, &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("\"urlsVisited\": 2"));
/// ```
pub fn write_result<W: Write>(result: &CrawlResult, mut writer: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the crawl result to `path`, replacing any existing file
///
/// Missing parent directories are created.
pub fn write_result_to_path(result: &CrawlResult, path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_result(result, BufWriter::new(file))
}
