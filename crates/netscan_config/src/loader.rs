//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::NetscanConfig;
use std::path::Path;

/// Name of the configuration file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = "netscan.toml";

/// Largest accepted worker count.
pub const MAX_THREADS: usize = 1024;

/// Loads `<dir>/netscan.toml`, or the defaults if the file does not exist.
pub fn load_config(dir: &Path) -> Result<NetscanConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(NetscanConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates an explicitly named configuration file.
pub fn load_config_file(path: &Path) -> Result<NetscanConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a `netscan.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<NetscanConfig, ConfigError> {
    let config: NetscanConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &NetscanConfig) -> Result<(), ConfigError> {
    if config.extract.threads > MAX_THREADS {
        return Err(ConfigError::Invalid {
            key: "extract.threads",
            message: format!(
                "must be at most {MAX_THREADS}, got {}",
                config.extract.threads
            ),
        });
    }
    Ok(())
}
