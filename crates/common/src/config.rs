//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ShotframeError, ShotframeResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding device shells (`mockups/`) and textures (`backgrounds/`).
    pub assets_dir: PathBuf,

    /// Directory where exports are written.
    pub output_dir: PathBuf,

    /// Live preview resolution.
    pub preview: PreviewConfig,

    /// Font files used by the raster text layer.
    pub fonts: FontConfig,

    /// How long to wait for pending asset decodes before rendering anyway.
    pub asset_timeout_ms: u64,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Fixed internal resolution of the live preview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
}

/// Font files for title (bold) and subtitle (regular) runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontConfig {
    /// Regular weight font (TTF/OTF). Unset uses the system sans-serif face.
    pub regular: Option<PathBuf>,

    /// Bold weight font. Unset uses the system sans-serif bold face.
    pub bold: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shotframe_render=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("exports"),
            preview: PreviewConfig::default(),
            fonts: FontConfig::default(),
            asset_timeout_ms: 3000,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 1200,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing keys take their defaults.
    pub fn load_from(path: impl AsRef<Path>) -> ShotframeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ShotframeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Preview resolution must be non-degenerate.
    pub fn validate(&self) -> ShotframeResult<()> {
        if self.preview.width == 0 || self.preview.height == 0 {
            return Err(ShotframeError::config(format!(
                "preview size must be positive, got {}x{}",
                self.preview.width, self.preview.height
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("shotframe").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_preview_resolution() {
        let config = AppConfig::default();
        assert_eq!(config.preview.width, 600);
        assert_eq!(config.preview.height, 1200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = std::env::temp_dir().join("shotframe_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "asset_timeout_ms": 250 }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.asset_timeout_ms, 250);
        assert_eq!(config.preview.height, 1200);
        assert_eq!(config.logging.level, "info");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = AppConfig::load_from("/nonexistent/shotframe/config.json").unwrap_err();
        assert!(matches!(err, ShotframeError::FileNotFound { .. }));
    }

    #[test]
    fn test_zero_preview_rejected() {
        let mut config = AppConfig::default();
        config.preview.width = 0;
        assert!(config.validate().is_err());
    }
}
