//! Cover-fit sampling.
//!
//! Picks the sub-rectangle of a source image that, stretched into a
//! destination of a given aspect ratio, fills it completely without
//! distortion (the equivalent of CSS `object-fit: cover`).

use serde::Serialize;
use shotframe_model::Rect;

/// Source-space rectangle to sample, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverSample {
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
}

impl CoverSample {
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.sx, self.sy, self.sw, self.sh)
    }
}

/// Largest centered sub-rectangle of a `source_w` x `source_h` image with
/// aspect ratio `target_ratio` (width over height).
///
/// Callers must pass a positive source size and ratio; decoded images always
/// have one.
pub fn compute_cover_sample(source_w: f64, source_h: f64, target_ratio: f64) -> CoverSample {
    debug_assert!(source_w > 0.0 && source_h > 0.0 && target_ratio > 0.0);
    let source_ratio = source_w / source_h;

    if source_ratio > target_ratio {
        // Source is wider: keep full height, trim the sides.
        let sw = source_h * target_ratio;
        CoverSample {
            sx: (source_w - sw) / 2.0,
            sy: 0.0,
            sw,
            sh: source_h,
        }
    } else {
        // Source is taller (or equal): keep full width, trim top and bottom.
        let sh = source_w / target_ratio;
        CoverSample {
            sx: 0.0,
            sy: (source_h - sh) / 2.0,
            sw: source_w,
            sh,
        }
    }
}

/// Integer crop box for `(source_w, source_h)` matching `target_w:target_h`,
/// truncated toward zero and centered, as used when cropping files on disk.
pub fn cover_crop_box(source_w: u32, source_h: u32, target_w: u32, target_h: u32) -> (u32, u32, u32, u32) {
    let ratio = target_w as f64 / target_h as f64;
    let (crop_w, crop_h) = if source_w as f64 / source_h as f64 > ratio {
        ((source_h as f64 * ratio) as u32, source_h)
    } else {
        (source_w, (source_w as f64 / ratio) as u32)
    };
    let crop_w = crop_w.clamp(1, source_w);
    let crop_h = crop_h.clamp(1, source_h);
    ((source_w - crop_w) / 2, (source_h - crop_h) / 2, crop_w, crop_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wide_source_trims_sides() {
        let s = compute_cover_sample(2000.0, 1000.0, 0.5);
        assert_eq!(s.sh, 1000.0);
        assert_eq!(s.sw, 500.0);
        assert_eq!(s.sx, 750.0);
        assert_eq!(s.sy, 0.0);
    }

    #[test]
    fn test_tall_source_trims_top_bottom() {
        let s = compute_cover_sample(1000.0, 4000.0, 0.5);
        assert_eq!(s.sw, 1000.0);
        assert_eq!(s.sh, 2000.0);
        assert_eq!(s.sx, 0.0);
        assert_eq!(s.sy, 1000.0);
    }

    #[test]
    fn test_matching_ratio_uses_whole_source() {
        let s = compute_cover_sample(1170.0, 2532.0, 1170.0 / 2532.0);
        assert!((s.sw - 1170.0).abs() < 1e-9);
        assert!((s.sh - 2532.0).abs() < 1e-9);
        assert!(s.sx.abs() < 1e-9);
        assert!(s.sy.abs() < 1e-9);
    }

    #[test]
    fn test_crop_box_landscape_to_square() {
        assert_eq!(cover_crop_box(1920, 1080, 512, 512), (420, 0, 1080, 1080));
    }

    #[test]
    fn test_crop_box_portrait_to_banner() {
        let (x, y, w, h) = cover_crop_box(1080, 1920, 1024, 500);
        assert_eq!((x, w), (0, 1080));
        assert_eq!(h, (1080.0 / (1024.0 / 500.0)) as u32);
        assert_eq!(y, (1920 - h) / 2);
    }

    proptest! {
        #[test]
        fn prop_cover_sample_is_centered_and_inside(
            w in 1.0f64..8000.0,
            h in 1.0f64..8000.0,
            ratio in 0.05f64..20.0,
        ) {
            let s = compute_cover_sample(w, h, ratio);
            let tol = 1e-9 * w.max(h);

            prop_assert!(((s.sw / s.sh) - ratio).abs() <= 1e-9 * ratio.max(1.0));
            prop_assert!(s.sx >= -tol && s.sx + s.sw <= w + tol);
            prop_assert!(s.sy >= -tol && s.sy + s.sh <= h + tol);

            let x_centered = (s.sx - (w - s.sw) / 2.0).abs() <= tol;
            let y_centered = (s.sy - (h - s.sh) / 2.0).abs() <= tol;
            prop_assert!(x_centered && y_centered);

            // Largest such rectangle: one axis spans the full source.
            prop_assert!((s.sw - w).abs() <= tol || (s.sh - h).abs() <= tol);
        }
    }
}
