use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf};

/// Top-level configuration, read once at startup and immutable afterwards.
///
/// Credentials come from the config file with environment variables taking
/// precedence, so deployments can skip the file entirely.
///
/// Example TOML:
/// ```toml
/// openweather_api_key = "..."
/// news_api_key = "..."
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub openweather_api_key: Option<String>,
    pub news_api_key: Option<String>,
}

impl Config {
    /// Load config from disk (or start empty if no file exists yet), then
    /// apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skydeck", "skydeck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("OPENWEATHER_API_KEY") {
            if !key.is_empty() {
                self.openweather_api_key = Some(key);
            }
        }

        if let Ok(key) = env::var("NEWS_API_KEY") {
            if !key.is_empty() {
                self.news_api_key = Some(key);
            }
        }
    }
}
