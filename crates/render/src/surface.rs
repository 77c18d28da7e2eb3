//! Drawing surface abstraction.

use image::RgbaImage;
use serde::Serialize;
use shotframe_common::ShotframeResult;
use shotframe_model::{Color, Rect};

/// How a rectangle is filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Color },

    /// Two-stop linear gradient between two points in surface pixels.
    LinearGradient {
        start: (f64, f64),
        end: (f64, f64),
        from: Color,
        to: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A single line of horizontally centered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,

    /// Em size in surface pixels.
    pub font_size: f64,

    pub weight: FontWeight,
    pub color: Color,

    /// Horizontal center of the line.
    pub center_x: f64,

    /// Alphabetic baseline.
    pub baseline: f64,
}

/// Drawing target used by the compositor.
///
/// Coordinates are surface pixels with the origin top-left. Later calls
/// paint over earlier ones.
pub trait Surface {
    /// Resize to `width` x `height` and clear to transparent.
    fn reset(&mut self, width: u32, height: u32) -> ShotframeResult<()>;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn fill_rect(&mut self, rect: Rect, fill: &Fill);

    /// Draw the `src` region of `image` stretched into `dst`.
    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect);

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, line_width: f64, color: Color);

    fn fill_text(&mut self, run: &TextRun);
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Reset {
        width: u32,
        height: u32,
    },
    FillRect {
        rect: Rect,
        fill: Fill,
    },
    DrawImage {
        image_width: u32,
        image_height: u32,
        src: Rect,
        dst: Rect,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: f64,
        line_width: f64,
        color: Color,
    },
    FillText {
        run: TextRun,
    },
}

/// Surface that keeps the draw calls instead of pixels.
///
/// `reset` clears the log, so after a render it holds exactly one pass.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl Surface for RecordingSurface {
    fn reset(&mut self, width: u32, height: u32) -> ShotframeResult<()> {
        self.width = width;
        self.height = height;
        self.ops.clear();
        self.ops.push(DrawOp::Reset { width, height });
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        self.ops.push(DrawOp::FillRect {
            rect,
            fill: fill.clone(),
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::DrawImage {
            image_width: image.width(),
            image_height: image.height(),
            src,
            dst,
        });
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, line_width: f64, color: Color) {
        self.ops.push(DrawOp::StrokeRoundRect {
            rect,
            radius,
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, run: &TextRun) {
        self.ops.push(DrawOp::FillText { run: run.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_previous_pass() {
        let mut surface = RecordingSurface::new();
        surface.reset(10, 20).unwrap();
        surface.fill_rect(Rect::from_size(10.0, 20.0), &Fill::Solid { color: Color::WHITE });
        surface.reset(30, 40).unwrap();
        assert_eq!(surface.ops(), &[DrawOp::Reset { width: 30, height: 40 }]);
        assert_eq!((surface.width(), surface.height()), (30, 40));
    }

    #[test]
    fn test_ops_serialize_tagged() {
        let op = DrawOp::FillRect {
            rect: Rect::from_size(1.0, 1.0),
            fill: Fill::Solid { color: Color::BLACK },
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "fill_rect");
        assert_eq!(json["fill"]["kind"], "solid");
    }
}
