use crate::config::patterns::compile_patterns;
use crate::config::types::CrawlerConfig;
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_starting_urls(&config.starting_urls)?;
    validate_parallelism(config.parallelism)?;
    validate_patterns(config)?;
    validate_output_paths(config)?;
    Ok(())
}

/// Validates the seed URLs
fn validate_starting_urls(urls: &[String]) -> Result<(), ConfigError> {
    if urls.is_empty() {
        return Err(ConfigError::Validation(
            "startingUrls must contain at least one URL".to_string(),
        ));
    }

    for url in urls {
        Url::parse(url).map_err(|e| {
            ConfigError::Validation(format!("Invalid starting URL '{}': {}", url, e))
        })?;
    }

    Ok(())
}

fn validate_parallelism(parallelism: usize) -> Result<(), ConfigError> {
    if parallelism < 1 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be >= 1, got {}",
            parallelism
        )));
    }
    Ok(())
}

/// Checks that every ignored-URL and ignored-word pattern compiles
fn validate_patterns(config: &CrawlerConfig) -> Result<(), ConfigError> {
    compile_patterns(&config.ignored_urls)?;
    compile_patterns(&config.ignored_words)?;
    Ok(())
}

fn validate_output_paths(config: &CrawlerConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("resultPath", &config.result_path),
        ("profileOutputPath", &config.profile_output_path),
    ] {
        if path.as_deref().is_some_and(|p| p == Path::new("")) {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }
    Ok(())
}
