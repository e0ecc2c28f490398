use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

const CONFIG_DIR: &str = ".storysmith";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Loads `~/.storysmith/config.toml`, writing a default file on first run,
    /// then layers environment overrides on top and validates the result.
    pub fn load_or_init() -> std::result::Result<Self, ConfigError> {
        Self::load_or_init_inner().map_err(|e| ConfigError::Load(format!("{e:#}")))
    }

    fn load_or_init_inner() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let config_path = home.join(CONFIG_DIR).join(CONFIG_FILE);
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads the file at `config_path`, creating it with defaults if missing.
    /// Environment overrides are not applied here.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            tracing::debug!(path = %config_path.display(), "Wrote default config");
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
