//! Title and subtitle pass.

use shotframe_layout::{text_layout, TextConfig};

use crate::surface::{FontWeight, Surface, TextRun};

/// Draw the title (bold) and subtitle (regular) centered near the top.
///
/// Nothing is drawn when both are empty; an empty line is skipped on its own.
pub fn draw_text<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    title: &str,
    subtitle: &str,
    config: &TextConfig,
) {
    if title.is_empty() && subtitle.is_empty() {
        return;
    }
    let layout = text_layout(width, height, config);

    if !title.is_empty() {
        surface.fill_text(&TextRun {
            text: title.to_string(),
            font_size: layout.title_size,
            weight: FontWeight::Bold,
            color: config.title_color,
            center_x: layout.center_x,
            baseline: layout.title_baseline,
        });
    }
    if !subtitle.is_empty() {
        surface.fill_text(&TextRun {
            text: subtitle.to_string(),
            font_size: layout.subtitle_size,
            weight: FontWeight::Regular,
            color: config.subtitle_color,
            center_x: layout.center_x,
            baseline: layout.subtitle_baseline,
        });
    }
}
