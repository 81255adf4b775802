use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load and validate configuration from a YAML file.
///
/// An empty file yields the built-in defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config = if content.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str::<AppConfig>(&content)?
    };

    config.validate()?;
    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}
