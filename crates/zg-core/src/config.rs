// ABOUTME: Layout configuration handling.
// ABOUTME: Loads and saves settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::EasingCurve;

/// Contents margins around the laid-out area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn uniform(m: f32) -> Self {
        Self {
            left: m,
            top: m,
            right: m,
            bottom: m,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(4.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Zoom/restore transition duration in milliseconds
    pub animation_duration_ms: u64,

    /// Easing curve for displaced panels (the focused panel always uses
    /// ease-out on the way in and ease-in on the way back)
    pub easing: EasingCurve,

    /// Layout units of container width per derived column
    pub cell_width_threshold: f32,

    /// Spacing between adjacent cells
    pub spacing: f32,

    /// Contents margins
    pub margins: Margins,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 250,
            easing: EasingCurve::Linear,
            cell_width_threshold: 150.0,
            spacing: 6.0,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl LayoutConfig {
    /// Get the default config file path (~/.config/zoomgrid/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zoomgrid").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
