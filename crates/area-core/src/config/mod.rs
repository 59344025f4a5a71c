//! Configuration management for Area.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `area.toml` file
//! 3. User config `~/.config/area/config.toml`
//! 4. Built-in defaults (lowest priority)

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playground::Position;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection.
    pub backend: BackendConfig,

    /// Projection layout.
    pub layout: LayoutConfig,

    /// Command palette.
    pub palette: PaletteConfig,

    /// Editing behavior.
    pub editor: EditorConfig,

    /// Dedicated node widgets.
    pub widgets: WidgetConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./area.toml` (project local)
    /// 2. `~/.config/area/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("area.toml").exists() {
            return Self::from_file("area.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("area").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Self::default().finish()
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.finish()
    }

    /// Applies environment overrides, then validates the result.
    fn finish(mut self) -> Result<Self, ConfigError> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(self)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("AREA_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(token) = std::env::var("AREA_TOKEN") {
            self.backend.token = Some(token);
        }
        if let Ok(rollback) = std::env::var("AREA_ROLLBACK") {
            if let Ok(b) = rollback.parse() {
                self.editor.rollback_on_failure = b;
            }
        }
    }

    /// Rejects values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("backend.base_url is empty".to_string()));
        }
        let spacing = self.layout.vertical_spacing;
        if spacing.is_nan() || spacing <= 0.0 {
            return Err(ConfigError::Invalid(
                "layout.vertical_spacing must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the configuration as TOML. The token is never written.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        Config::default().to_toml()
    }
}

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend address.
    pub base_url: String,

    /// Bearer token (can also be set via `AREA_TOKEN`).
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            token: None, // Load from env
        }
    }
}

/// Projection layout: one vertical lane per entity kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
        }
    }
}

/// Command palette configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Where inserted nodes appear.
    pub default_position: Position,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            default_position: Position::new(DEFAULT_PALETTE_X, DEFAULT_PALETTE_Y),
        }
    }
}

/// Editing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Icon for nodes whose definition is not in the catalog.
    pub default_icon: String,

    /// Undo optimistic graph changes when a remote mutation fails.
    pub rollback_on_failure: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_icon: DEFAULT_ICON.to_string(),
            rollback_on_failure: DEFAULT_ROLLBACK_ON_FAILURE,
        }
    }
}

/// Widget bindings by definition name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub actions: BTreeMap<String, String>,
    pub reactions: BTreeMap<String, String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(name, widget)| (name.to_string(), widget.to_string()))
                .collect()
        };
        Self {
            actions: to_map(DEFAULT_ACTION_WIDGETS),
            reactions: to_map(DEFAULT_REACTION_WIDGETS),
        }
    }
}
