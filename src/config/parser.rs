use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The result is validated, so a config carrying no seeds is rejected here.
/// Callers that want to apply command-line overrides before validating should
/// use [`parse_config`] and call [`validate`](crate::config::validate) themselves.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use mailhost_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Store: {}", config.output.store_path);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let config = parse_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Reads and deserializes a configuration file without validating it
pub fn parse_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is logged and stamped into the crawl report so a run can be tied
/// back to the exact configuration that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Parses a configuration and returns both the config and its hash
///
/// Validation is left to the caller.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = parse_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
