use crate::config::types::CrawlerConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::io::Read;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Files ending in `.toml` are parsed as TOML; anything else is parsed as JSON.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// * `Ok(CrawlerConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use word_crawler::config::load_config;
///
/// let config = load_config(Path::new("crawl.json")).unwrap();
/// println!("Max depth: {}", config.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        read_config_toml(&content)
    } else {
        read_config_json(content.as_bytes())
    }
}

/// Parses and validates a JSON configuration from a reader
pub fn read_config_json<R: Read>(reader: R) -> Result<CrawlerConfig, ConfigError> {
    let config: CrawlerConfig = serde_json::from_reader(reader)?;
    validate(&config)?;
    Ok(config)
}

/// Parses and validates a TOML configuration
pub fn read_config_toml(content: &str) -> Result<CrawlerConfig, ConfigError> {
    let config: CrawlerConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}
