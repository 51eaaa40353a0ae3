use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config: {}", path.as_ref().display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;

    Ok(config)
}

/// Missing files fall back to defaults; unreadable or invalid ones are errors.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    if !path.as_ref().exists() {
        log::warn!(
            "Configuration file '{}' not found, using default configuration",
            path.as_ref().display()
        );
        return Ok(Config::default());
    }

    let config = load_config(&path)?;
    log::info!("Loaded configuration from: {}", path.as_ref().display());
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let content = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
    Ok(())
}
