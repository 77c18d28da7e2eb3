//! Listing compositor.
//!
//! One pass per call, in a fixed order: clear, background, screenshot,
//! device shell (or its placeholder), text. The shell is drawn after the
//! screenshot so its bezel and notch cover the screenshot edges.

use image::RgbaImage;
use shotframe_common::{ShotframeError, ShotframeResult};
use shotframe_layout::{compute_cover_sample, px_unit, solve, LayoutResult};
use shotframe_model::{AssetStore, Rect, RenderState};

use crate::background;
use crate::style::RenderStyle;
use crate::surface::Surface;
use crate::text::draw_text;

/// Draw `image` into `dest`, cropped to `target_ratio` so it is never
/// distorted. Zero-sized images are skipped.
pub fn draw_covered<S: Surface + ?Sized>(
    surface: &mut S,
    image: &RgbaImage,
    dest: Rect,
    target_ratio: f64,
) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }
    let sample = compute_cover_sample(image.width() as f64, image.height() as f64, target_ratio);
    surface.draw_image(image, sample.as_rect(), dest);
}

/// Render `state` onto `surface` at `width` x `height`.
///
/// Returns the layout used so callers can inspect where things landed.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    width: u32,
    height: u32,
    state: &RenderState<'_>,
    assets: &AssetStore,
    style: &RenderStyle,
) -> ShotframeResult<LayoutResult> {
    if width == 0 || height == 0 {
        return Err(ShotframeError::invalid_input(format!(
            "Render target must be non-empty, got {width}x{height}"
        )));
    }
    surface.reset(width, height)?;
    let (w, h) = (width as f64, height as f64);

    background::paint(surface, w, h, state.background, assets);

    let device = state.device;
    let layout = solve(w, h, device, &style.layout);

    if let Some(shot) = state.screenshot {
        draw_covered(surface, &shot.image, layout.screen_dest_rect, device.screen_ratio);
    }

    match assets.ready(&device.shell_key()) {
        Some(shell) => {
            let src = Rect::from_size(shell.width() as f64, shell.height() as f64);
            surface.draw_image(shell, src, layout.frame_rect);
        }
        None => {
            let unit = px_unit(w, h);
            let placeholder = &style.placeholder;
            surface.stroke_round_rect(
                layout.frame_rect,
                placeholder.corner_radius_px * unit,
                placeholder.stroke_px * unit,
                placeholder.color,
            );
        }
    }

    draw_text(surface, w, h, state.title, state.subtitle, &style.text);

    tracing::debug!(
        width,
        height,
        device = %device.key,
        screenshot = state.screenshot.is_some(),
        "Rendered listing"
    );

    Ok(layout)
}
