//! Text layer metrics.
//!
//! Font sizes scale with the shorter canvas side and baselines with the
//! canvas height, so the title block keeps its proportions at every export
//! size.

use serde::{Deserialize, Serialize};
use shotframe_model::Color;

use crate::solver::px_unit;

/// Proportions and colors of the title/subtitle block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Title font size as a fraction of `min(w, h)`.
    pub title_ratio: f64,

    /// Subtitle font size relative to the title size.
    pub subtitle_ratio: f64,

    /// Title baseline as a fraction of canvas height.
    pub title_baseline: f64,

    /// Gap between the title line and subtitle baseline, in preview pixels.
    pub gap_px: f64,

    pub title_color: Color,
    pub subtitle_color: Color,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            title_ratio: 0.045,
            subtitle_ratio: 0.5,
            title_baseline: 0.06,
            gap_px: 8.0,
            title_color: Color::rgb(0x1d, 0x1d, 0x1f),
            subtitle_color: Color::rgb(0x6e, 0x6e, 0x73),
        }
    }
}

/// Resolved positions for one canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextLayout {
    /// Horizontal center of both lines.
    pub center_x: f64,
    pub title_size: f64,
    pub title_baseline: f64,
    pub subtitle_size: f64,
    pub subtitle_baseline: f64,
}

/// Compute the text block for a `canvas_w` x `canvas_h` canvas.
pub fn text_layout(canvas_w: f64, canvas_h: f64, config: &TextConfig) -> TextLayout {
    let title_size = config.title_ratio * canvas_w.min(canvas_h);
    let title_baseline = canvas_h * config.title_baseline;
    let gap = config.gap_px * px_unit(canvas_w, canvas_h);

    TextLayout {
        center_x: canvas_w / 2.0,
        title_size,
        title_baseline,
        subtitle_size: title_size * config.subtitle_ratio,
        subtitle_baseline: title_baseline + title_size + gap,
    }
}
