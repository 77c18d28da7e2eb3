//! Mockup placement.
//!
//! Fits the device frame into the canvas below a reserved title band and
//! above a bottom margin, then derives where the screenshot goes from the
//! device's screen fractions. Every length is a fixed fraction of the canvas,
//! so two canvases with the same aspect ratio get the same layout up to a
//! uniform scale; that is what keeps the preview and exports identical.

use serde::{Deserialize, Serialize};
use shotframe_model::{DeviceProfile, Rect};

/// Shortest canvas side of the live preview. Lengths specified "in preview
/// pixels" are multiplied by `min(w, h) / REFERENCE_MIN_SIDE`.
pub const REFERENCE_MIN_SIDE: f64 = 600.0;

/// Size of one preview pixel on a `canvas_w` x `canvas_h` canvas.
pub fn px_unit(canvas_w: f64, canvas_h: f64) -> f64 {
    canvas_w.min(canvas_h) / REFERENCE_MIN_SIDE
}

/// Canvas fractions reserved around the device frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal padding on each side, as a fraction of canvas width.
    pub side_pad: f64,

    /// Band kept free at the top for the text layer, fraction of height.
    pub title_band: f64,

    /// Margin below the frame, fraction of height.
    pub bottom_pad: f64,

    /// Upper bound on the frame scale, in preview pixels per design pixel.
    pub max_scale: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            side_pad: 0.08,
            title_band: 0.12,
            bottom_pad: 0.05,
            max_scale: None,
        }
    }
}

/// Where the frame and screenshot land on one target surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Device shell placement, in surface pixels.
    pub frame_rect: Rect,

    /// Screenshot destination, in surface pixels.
    pub screen_dest_rect: Rect,

    /// Surface pixels per design pixel of the shell artwork.
    pub scale: f64,
}

impl LayoutResult {
    /// Both rectangles as fractions of the canvas.
    pub fn to_fractions(&self, canvas_w: f64, canvas_h: f64) -> (Rect, Rect) {
        (
            self.frame_rect.to_fractions(canvas_w, canvas_h),
            self.screen_dest_rect.to_fractions(canvas_w, canvas_h),
        )
    }
}

/// Lay out `device` on a `canvas_w` x `canvas_h` canvas.
pub fn solve(
    canvas_w: f64,
    canvas_h: f64,
    device: &DeviceProfile,
    config: &LayoutConfig,
) -> LayoutResult {
    let title_band_h = canvas_h * config.title_band;
    let bottom_pad = canvas_h * config.bottom_pad;
    let max_w = canvas_w * (1.0 - 2.0 * config.side_pad);
    let max_h = canvas_h - title_band_h - bottom_pad;

    let frame = device.frame_size;
    let mut scale = (max_w / frame.w).min(max_h / frame.h);
    if let Some(cap) = config.max_scale {
        scale = scale.min(cap * px_unit(canvas_w, canvas_h));
    }
    let scale = scale.max(0.0);

    let frame_w = frame.w * scale;
    let frame_h = frame.h * scale;
    let frame_rect = Rect::new(
        (canvas_w - frame_w) / 2.0,
        canvas_h - bottom_pad - frame_h,
        frame_w,
        frame_h,
    );
    let screen_dest_rect = frame_rect.sub_rect(&device.screen_rect);

    tracing::trace!(
        device = %device.key,
        canvas_w,
        canvas_h,
        scale,
        "Solved mockup layout"
    );

    LayoutResult {
        frame_rect,
        screen_dest_rect,
        scale,
    }
}
