//! Configuration loading functionality.
//!
//! Handles locating the configuration file, creating it on first run, and
//! applying `geo.toml` coordinate overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::validation::validate_config;
use super::{Config, GeoConfig};
use crate::common::constants::*;
use crate::common::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration directory for the current process.
///
/// Can only be called once, typically right after argument parsing.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

fn custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Path of `daybreak.toml` for this process.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(dir) = custom_config_dir() {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Path of the optional `geo.toml` next to a config file.
pub fn geo_path_for(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|dir| dir.join("geo.toml"))
        .unwrap_or_else(|| PathBuf::from("geo.toml"))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file if none exists.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        super::builder::create_default_config(&config_path, None)
            .context("Failed to create default config during load")?;
        log_block_start!(
            "Created default configuration: {}",
            private_path(&config_path)
        );
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// Does NOT create a default config if the path doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", private_path(path));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    load_geo_override_from_path(&mut config, &geo_path_for(path))?;
    validate_config(&config)?;

    Ok(config)
}

/// Apply coordinates from `geo.toml`, if present.
fn load_geo_override_from_path(config: &mut Config, geo_path: &Path) -> Result<()> {
    if !geo_path.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(geo_path)
        .with_context(|| format!("Failed to read {}", private_path(geo_path)))?;
    let geo: GeoConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", private_path(geo_path)))?;

    if geo.latitude.is_some() {
        config.latitude = geo.latitude;
    }
    if geo.longitude.is_some() {
        config.longitude = geo.longitude;
    }

    log_debug!("Loaded coordinates from {}", private_path(geo_path));
    Ok(())
}
