//! Application configuration

use crate::filter::Segment;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GalleryConfig {
    pub general: GeneralConfig,
    pub grid: GridConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: String,
    pub theme: String,
    /// Segment the gallery opens with
    pub default_segment: Segment,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            theme: "light".to_string(),
            default_segment: Segment::All,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub thumbnail_size: u32,
    pub columns: u32,
    pub confirm_delete: bool,
    /// Show the fast-scroll handle once the list exceeds this many items
    pub fast_scroll_threshold: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: 128,
            columns: 3,
            confirm_delete: true,
            fast_scroll_threshold: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub enable_animation: bool,
    pub preload_count: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enable_animation: true,
            preload_count: 3,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "PhotoShelf", "PhotoShelf")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrips_through_toml() {
        let config = GalleryConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: GalleryConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.grid.thumbnail_size, config.grid.thumbnail_size);
        assert_eq!(back.general.default_segment, Segment::All);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let back: GalleryConfig = toml::from_str("[grid]\ncolumns = 4\n").unwrap();
        assert_eq!(back.grid.columns, 4);
        assert_eq!(back.grid.thumbnail_size, 128);
        assert!(back.viewer.enable_animation);
    }
}
