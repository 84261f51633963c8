//! Application configuration handling.
//!
//! Settings live in a TOML file under the user config directory and can
//! be overridden with `ORBITRON__*` environment variables. Every field
//! has a default matching the simulator's documented behavior, so a
//! missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory under the user config root that holds our files.
pub const CONFIG_DIR: &str = "orbitron";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Tunable application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the wish oracle. `0` derives a seed from the clock.
    pub seed: u64,
    /// Energy meter value at startup.
    pub starting_energy: u8,
    /// Seconds between passive regeneration ticks.
    pub regen_interval_secs: u64,
    /// Seconds between a granted wish and its reward.
    pub reward_delay_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_energy: 100,
            regen_interval_secs: 3,
            reward_delay_secs: 1,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location plus
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path())
    }

    /// Load configuration from an explicit file path plus environment
    /// overrides. The file may be absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix("ORBITRON").separator("__"))
            .build()
            .context("failed to assemble configuration")?;
        let parsed = settings
            .try_deserialize::<AppConfig>()
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(parsed)
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write a default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(&default_config_path())
}

fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialised =
        toml::to_string_pretty(&AppConfig::default()).context("failed to serialise defaults")?;
    fs::write(path, serialised).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(&dir.path().join("nope.toml"))?;
        assert_eq!(config.starting_energy, 100);
        assert_eq!(config.regen_interval_secs, 3);
        assert_eq!(config.reward_delay_secs, 1);
        assert_eq!(config.seed, 0);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = 12345\nstarting_energy = 50\n")?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.seed, 12345);
        assert_eq!(config.starting_energy, 50);
        assert_eq!(config.regen_interval_secs, 3);
        Ok(())
    }

    #[test]
    fn default_file_is_written_once() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let written = fs::read_to_string(&path)?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, written);
        Ok(())
    }
}
