//! Render style: every tunable proportion of the composite in one place.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shotframe_common::{ShotframeError, ShotframeResult};
use shotframe_layout::{LayoutConfig, TextConfig};
use shotframe_model::Color;

/// Outline drawn where the device shell goes while its artwork is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderStyle {
    /// Corner radius in preview pixels.
    pub corner_radius_px: f64,

    /// Line width in preview pixels.
    pub stroke_px: f64,

    pub color: Color,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            corner_radius_px: 28.0,
            stroke_px: 2.0,
            color: Color::rgba(0, 0, 0, 0x33),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub layout: LayoutConfig,
    pub text: TextConfig,
    pub placeholder: PlaceholderStyle,
}

impl RenderStyle {
    /// Load a style file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> ShotframeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ShotframeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let style: RenderStyle = serde_json::from_str(&content)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> ShotframeResult<()> {
        let l = &self.layout;
        if l.side_pad < 0.0 || l.side_pad >= 0.5 {
            return Err(ShotframeError::config("layout.side_pad must be in [0, 0.5)"));
        }
        if l.title_band < 0.0 || l.bottom_pad < 0.0 || l.title_band + l.bottom_pad >= 1.0 {
            return Err(ShotframeError::config(
                "layout.title_band + layout.bottom_pad must leave room for the device",
            ));
        }
        if matches!(l.max_scale, Some(cap) if cap <= 0.0) {
            return Err(ShotframeError::config("layout.max_scale must be positive"));
        }
        if self.text.title_ratio <= 0.0 {
            return Err(ShotframeError::config("text.title_ratio must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_style_keeps_defaults() {
        let style: RenderStyle =
            serde_json::from_str(r##"{"placeholder": {"color": "#ff000080"}}"##).unwrap();
        assert_eq!(style.placeholder.color, Color::rgba(255, 0, 0, 0x80));
        assert_eq!(style.placeholder.corner_radius_px, 28.0);
        assert_eq!(style.layout, LayoutConfig::default());
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overfull_bands() {
        let mut style = RenderStyle::default();
        style.layout.title_band = 0.6;
        style.layout.bottom_pad = 0.5;
        assert!(matches!(style.validate(), Err(ShotframeError::Config { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RenderStyle::load("/nonexistent/shotframe/style.json").unwrap_err();
        assert!(matches!(err, ShotframeError::FileNotFound { .. }));
    }
}
