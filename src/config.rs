// ABOUTME: Configuration parsing from TOML file with environment variable overrides
// ABOUTME: Validates required fields and provides sensible defaults for optional ones
use crate::paths;
use anyhow::{Context, Result};
use chatgate_core::ChatConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Find the config file, checking multiple locations in order:
    /// 1. CHATGATE_CONFIG_PATH env var (if set)
    /// 2. ./config.toml (current directory - for development)
    /// 3. ~/.config/chatgate/config.toml (XDG config dir)
    fn find_config_file() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var("CHATGATE_CONFIG_PATH") {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Some(path);
            }
        }

        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = paths::config_file();
        if xdg_config.exists() {
            return Some(xdg_config);
        }

        None
    }

    /// Load configuration with environment variable overrides.
    /// Searches: CHATGATE_CONFIG_PATH env var, ./config.toml, then the XDG config file
    pub fn load() -> Result<Self> {
        let config = match Self::find_config_file() {
            Some(config_path) => Self::from_file(&config_path)?,
            None => {
                tracing::info!("No config file found, using environment variables and defaults");
                Config::default()
            }
        };
        config.finish()
    }

    /// Load from an explicit path with environment variable overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::from_file(path)?.finish()
    }

    /// Parse configuration from a TOML string, without env overrides
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "Loading configuration from file");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str::<Config>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn finish(mut self) -> Result<Self> {
        self.apply_env_overrides()?;
        self.validate()?;
        Ok(self)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CHATGATE_SERVICE") {
            self.chat.service = val;
        }
        if let Ok(val) = std::env::var("CHATGATE_DEFAULT_ROOM") {
            self.chat.default_room = val;
        }
        if let Ok(val) = std::env::var("CHATGATE_MOCK") {
            self.chat.mock = parse_flag(&val).with_context(|| {
                format!("CHATGATE_MOCK must be a boolean flag, got: {}", val)
            })?;
        }
        if let Ok(val) = std::env::var("CHATGATE_LOG_FORMAT") {
            self.logging.format = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.chat.service.trim().is_empty() {
            anyhow::bail!(
                "chat.service is required (set in config.toml or CHATGATE_SERVICE env var)"
            );
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => anyhow::bail!(
                "logging.format must be \"pretty\" or \"json\", got: {}",
                other
            ),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("unrecognized flag value"),
    }
}
