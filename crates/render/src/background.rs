//! Background pass.

use shotframe_model::{AssetStore, BackgroundSpec, Color, Rect};

use crate::surface::{Fill, Surface};

/// Paint `spec` over the whole `width` x `height` region.
///
/// A texture is drawn stretched (no aspect preservation) when its image is
/// ready; otherwise its fallback is painted. The store is consulted on every
/// call, so a texture that finishes loading shows up on the next pass.
pub fn paint<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    spec: &BackgroundSpec,
    assets: &AssetStore,
) {
    let region = Rect::from_size(width, height);
    match spec {
        BackgroundSpec::Solid { color } => {
            surface.fill_rect(region, &Fill::Solid { color: *color });
        }
        BackgroundSpec::Gradient {
            from,
            to,
            angle_degrees,
        } => {
            surface.fill_rect(region, &gradient_fill(width, height, *from, *to, *angle_degrees));
        }
        BackgroundSpec::Texture(texture) => match assets.ready(texture.texture()) {
            Some(image) => {
                let src = Rect::from_size(image.width() as f64, image.height() as f64);
                surface.draw_image(image, src, region);
            }
            None => {
                tracing::trace!(texture = %texture.texture(), "Texture not ready, using fallback");
                paint(surface, width, height, texture.fallback(), assets);
            }
        },
    }
}

/// Gradient axis from the origin to `(cos a * w, sin a * h)`.
fn gradient_fill(
    width: f64,
    height: f64,
    from: Color,
    to: Color,
    angle_degrees: f64,
) -> Fill {
    let radians = angle_degrees.to_radians();
    let end = (radians.cos() * width, radians.sin() * height);
    if end.0.abs() < 1e-9 && end.1.abs() < 1e-9 {
        return Fill::Solid { color: to };
    }
    Fill::LinearGradient {
        start: (0.0, 0.0),
        end,
        from,
        to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use shotframe_model::background::palette_entry;
    use shotframe_model::AssetKey;
    use crate::raster::{FontSet, PixmapSurface};
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_gradient_axis_follows_angle() {
        let from = Color::BLACK;
        let to = Color::WHITE;
        match gradient_fill(600.0, 1200.0, from, to, 0.0) {
            Fill::LinearGradient { end, .. } => assert_eq!(end, (600.0, 0.0)),
            other => panic!("unexpected {other:?}"),
        }
        match gradient_fill(600.0, 1200.0, from, to, 90.0) {
            Fill::LinearGradient { end, .. } => {
                assert!(end.0.abs() < 1e-9);
                assert!((end.1 - 1200.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_area_gradient_is_solid_end_color() {
        let fill = gradient_fill(0.0, 0.0, Color::BLACK, Color::WHITE, 45.0);
        assert_eq!(fill, Fill::Solid { color: Color::WHITE });
    }

    #[test]
    fn test_texture_without_image_paints_fallback() {
        let spec = palette_entry(3);
        let mut surface = RecordingSurface::new();
        paint(&mut surface, 10.0, 10.0, spec, &AssetStore::new());
        assert_eq!(
            surface.ops(),
            &[DrawOp::FillRect {
                rect: Rect::from_size(10.0, 10.0),
                fill: Fill::Solid {
                    color: Color::rgb(0xf5, 0xf5, 0xf5)
                },
            }]
        );
    }

    #[test]
    fn test_ready_texture_is_stretched() {
        let spec = palette_entry(0);
        let mut assets = AssetStore::new();
        assets.insert_ready(AssetKey::Texture(0), Arc::new(image::RgbaImage::new(30, 20)));
        let mut surface = RecordingSurface::new();
        paint(&mut surface, 600.0, 1200.0, spec, &assets);
        assert_eq!(
            surface.ops(),
            &[DrawOp::DrawImage {
                image_width: 30,
                image_height: 20,
                src: Rect::from_size(30.0, 20.0),
                dst: Rect::from_size(600.0, 1200.0),
            }]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_unloaded_texture_matches_fallback_pixels(
            index in 0usize..8,
            w in 1u32..96,
            h in 1u32..96,
        ) {
            let spec = palette_entry(index);
            let fallback = match spec {
                BackgroundSpec::Texture(texture) => texture.fallback(),
                other => other,
            };
            let assets = AssetStore::new();

            let mut textured = PixmapSurface::new(w, h, FontSet::default()).unwrap();
            paint(&mut textured, w as f64, h as f64, spec, &assets);
            let mut direct = PixmapSurface::new(w, h, FontSet::default()).unwrap();
            paint(&mut direct, w as f64, h as f64, fallback, &assets);

            prop_assert_eq!(textured.pixmap().data(), direct.pixmap().data());
        }
    }
}
