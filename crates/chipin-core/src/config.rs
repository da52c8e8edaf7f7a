use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChipinError, Result};

/// Root application configuration, loaded from `~/.config/chipin/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub widget: WidgetConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

/// Behaviour of one chip input instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Delay before the dropdown hides after the input loses focus.
    pub debounce_ms: u64,
    pub placeholder: String,
    /// Dropdown rows shown at once.
    pub max_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Event poll interval; also bounds how late a focus check can fire.
    pub tick_ms: u64,
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            placeholder: "Add new user...".to_string(),
            max_rows: 8,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "nord".to_string(),
            tick_ms: 50,
            mouse: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl WidgetConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/chipin/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("CHIPIN_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("chipin")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.widget.max_rows == 0 {
            return Err(ChipinError::ConfigError(
                "widget.max_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Log file: `[log].file` if set, else `<data dir>/chipin/chipin.log`.
    pub fn log_path(&self) -> PathBuf {
        if let Some(file) = &self.log.file {
            return PathBuf::from(file);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("chipin")
            .join("chipin.log")
    }
}
