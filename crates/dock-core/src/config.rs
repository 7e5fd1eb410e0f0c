// ABOUTME: Dock configuration handling.
// ABOUTME: Loads and saves layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Pixels, RegionSizes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Key the outermost container persists its layout under
    pub storage_key: String,

    /// Initial size of every edge region, in pixels
    pub default_size: f32,

    /// Floor applied to every edge size, interactive or loaded
    pub min_size: f32,

    /// Optional ceiling for edge sizes. `None` leaves growth unbounded.
    pub max_size: Option<f32>,

    /// Thickness of the drag handle on each edge region
    pub resizer_thickness: f32,

    /// Buffered notifications per container before slow subscribers lag
    pub event_capacity: usize,

    /// Overrides the directory `FileStore` writes layouts into
    pub state_dir: Option<PathBuf>,
}

impl DockConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "panel_system_config";

    /// Sizes a fresh container starts from, before anything is loaded
    pub fn initial_sizes(&self) -> RegionSizes {
        let mut sizes = RegionSizes::uniform(Pixels(self.default_size));
        sizes.clamp_all(self.min_size, self.max_size);
        sizes
    }
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            default_size: RegionSizes::DEFAULT_SIZE,
            min_size: 50.0,
            max_size: None,
            resizer_thickness: 5.0,
            event_capacity: 256,
            state_dir: None,
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

impl DockConfig {
    /// Get the default config file path (~/.config/panel-dock/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("panel-dock").join("config.toml"))
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
            .and_then(|path| match Self::load(&path) {
                Ok(config) => Some(config),
                Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
