// =============================================================================
// CONFIGURATION - Load settings from config.toml
// =============================================================================
//
// Every section and key is optional; anything missing takes its default.
// A missing or broken file falls back to the defaults entirely.

use anyhow::{Context, Result};
use log::{LevelFilter, ParseLevelError};
use serde::Deserialize;
use std::path::Path;

use crate::backend::DevicePreference;

/// Root configuration structure
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub window: WindowConfig,
    pub graphics: GraphicsConfig,
    pub debug: DebugConfig,
}

/// Which lesson the binary runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lesson {
    /// Window and event loop only
    Window,
    /// Window plus instance, debug messenger and logical device
    #[default]
    Device,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lesson: Lesson,
    /// Application name reported to the Vulkan driver
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lesson: Lesson::default(),
            name: "NeHe Vulkan Lesson 1".to_string(),
        }
    }
}

/// Window settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SDL Vulkan Window".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Graphics settings
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GraphicsConfig {
    pub device_preference: DevicePreference,
}

/// Debug settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub validation_layers: bool,
    pub log_level: String,
    pub log_to_stdout: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            validation_layers: true,
            log_level: "info".to_string(),
            log_to_stdout: true,
        }
    }
}

impl Config {
    /// Load config.toml, falling back to defaults.
    ///
    /// Runs before logging is set up, so a load failure is handed back for
    /// the caller to report once the logger exists.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        Self::load_or_default("config.toml")
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<anyhow::Error>) {
        match Self::load_from_path(path) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        log::info!("Loaded configuration from {:?}", path);
        log::debug!("Config: {:?}", config);

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configured log level filter
    pub fn log_level(&self) -> Result<LevelFilter, ParseLevelError> {
        self.debug.log_level.parse()
    }
}
