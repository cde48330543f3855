//! User configuration for the console front-end.
//!
//! Values are layered: built-in defaults, then `~/.config/tides/config.toml`, then
//! `TIDES_*` environment variables. Command-line flags are applied on top by the
//! binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "tides";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix of environment overrides, e.g. `TIDES_COLOR=false`.
pub const ENV_PREFIX: &str = "TIDES";

const DEFAULT_CONFIG: &str = r#"# Tides of Manila settings.

# Directory receiving tides.log.
# log_dir = "logs"

# Colour the console output.
color = true

# Fixed seed for market prices. Leave unset for a fresh roll every game.
# seed = 1234
"#;

/// Settings consumed by the binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where log files are written.
    pub log_dir: PathBuf,
    /// Whether to emit ANSI colours.
    pub color: bool,
    /// Seed for the market RNG; random when `None`.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            color: true,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load from the default file location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from a specific file plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(path.as_ref(), true)
    }

    fn load_layers(path: &Path, with_env: bool) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));
        }

        let settings = builder
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Default location of the configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(CONFIG_DIR).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Write the commented default file to the standard location if it is missing.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(config_path())
}

/// Write the commented default file to `path` if it is missing.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_layers(&dir.path().join("absent.toml"), false)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        ensure_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_layers(&path, false)?;
        assert!(config.color);
        assert_eq!(config.seed, None);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "color = false\nseed = 99\nlog_dir = \"/tmp/tides-logs\"\n")?;

        let config = AppConfig::load_layers(&path, false)?;
        assert!(!config.color);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/tides-logs"));
        Ok(())
    }

    #[test]
    fn existing_file_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "color = false\n")?;
        ensure_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "color = false\n");
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "color = [unterminated\n")?;
        assert!(AppConfig::load_layers(&path, false).is_err());
        Ok(())
    }
}
