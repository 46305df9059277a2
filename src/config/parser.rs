use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Parses and validates configuration text
///
/// Missing sections and keys take their defaults. An empty string yields
/// [`Config::default`].
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config = toml::from_str::<Config>(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads a configuration file from the given path
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use menu_scout::config::load_config;
///
/// let config = load_config(Path::new("menu-scout.toml")).unwrap();
/// println!("Pool size: {}", config.crawler.max_concurrent_classifications);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&fs::read_to_string(path)?)
}

/// Hex-encoded SHA-256 of a configuration file's content
///
/// Logged at startup so a report can be traced back to the settings that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    Ok(digest(&fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of the exact text that was parsed
///
/// The file is read once, so the hash always describes the loaded settings.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, digest(&content)))
}

fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
