use crate::core::currency::CurrencyCode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_FRANKFURTER_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode("EUR".to_string())
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after the first failed request
    #[serde(default)]
    pub retries: usize,
}

impl Default for FrankfurterProviderConfig {
    fn default() -> Self {
        FrankfurterProviderConfig {
            base_url: DEFAULT_FRANKFURTER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub frankfurter: Option<FrankfurterProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            frankfurter: Some(FrankfurterProviderConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Base currency of the gallery
    #[serde(default = "default_base_currency")]
    pub base_currency: CurrencyCode,
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            base_currency: default_base_currency(),
            history_days: DEFAULT_HISTORY_DAYS,
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no file exists there yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fxr", "fxr")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn frankfurter(&self) -> FrankfurterProviderConfig {
        self.providers.frankfurter.clone().unwrap_or_default()
    }
}

/// Session-wide user preferences, created once at startup and passed to the
/// views that need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    theme: Theme,
}

impl Preferences {
    pub fn new(theme: Theme) -> Self {
        Preferences { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!(?theme, "Theme changed");
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_theme(next);
        next
    }
}

impl From<&AppConfig> for Preferences {
    fn from(config: &AppConfig) -> Self {
        Preferences::new(config.theme)
    }
}
