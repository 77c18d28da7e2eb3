use std::sync::Arc;

use image::{Rgba, RgbaImage};
use shotframe_common::config::PreviewConfig;
use shotframe_model::background::palette_entry;
use shotframe_model::{device, AssetKey, AssetStore, BackgroundSpec, Platform, Rect, RenderState};
use shotframe_render::surface::{DrawOp, RecordingSurface};
use shotframe_render::{render, AssetEvent, FontSet, ListingEditor, PixmapSurface, RenderStyle};

fn editor() -> ListingEditor {
    ListingEditor::new(
        &PreviewConfig::default(),
        RenderStyle::default(),
        FontSet::default(),
    )
    .unwrap()
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

fn image_dsts(ops: &[DrawOp]) -> Vec<(u32, u32, Rect)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::DrawImage {
                image_width,
                image_height,
                dst,
                ..
            } => Some((*image_width, *image_height, *dst)),
            _ => None,
        })
        .collect()
}

#[test]
fn missing_texture_renders_exactly_like_its_fallback() {
    let style = RenderStyle::default();
    let assets = AssetStore::new();
    let iphone = device::lookup("iphone");

    for index in 0..6 {
        let texture = palette_entry(index);
        let fallback = match texture {
            BackgroundSpec::Texture(t) => t.fallback().clone(),
            other => panic!("palette entry {index} is {other:?}"),
        };

        let mut with_texture = PixmapSurface::new(60, 120, FontSet::default()).unwrap();
        let mut with_fallback = PixmapSurface::new(60, 120, FontSet::default()).unwrap();
        for (surface, background) in [(&mut with_texture, texture), (&mut with_fallback, &fallback)] {
            let state = RenderState {
                title: "",
                subtitle: "",
                background,
                device: iphone,
                screenshot: None,
            };
            render(surface, 60, 120, &state, &assets, &style).unwrap();
        }
        assert_eq!(
            with_texture.pixmap().data(),
            with_fallback.pixmap().data(),
            "palette entry {index}"
        );
    }
}

#[test]
fn shell_is_drawn_over_the_screenshot() {
    let mut ed = editor();
    ed.set_background(BackgroundSpec::default());
    ed.add_screenshots([solid(100, 200, [0, 0, 255, 255])]);
    let shell = ed.select_device(Platform::Apple, "iphone");
    assert!(ed.apply(AssetEvent {
        key: shell.key.clone(),
        generation: shell.generation,
        result: Ok(Arc::new(solid(39, 84, [255, 0, 0, 255]))),
    }));

    let mut recording = RecordingSurface::new();
    let layout = ed.render_to(&mut recording, 600, 1200).unwrap();
    let images = image_dsts(recording.ops());
    assert_eq!(images.len(), 2);
    assert_eq!((images[0].0, images[0].1), (100, 200));
    assert_eq!(images[0].2, layout.screen_dest_rect);
    assert_eq!((images[1].0, images[1].1), (39, 84));
    assert_eq!(images[1].2, layout.frame_rect);

    // An opaque shell hides the screenshot entirely.
    let preview = ed.render_preview().unwrap();
    let (cx, cy) = layout.screen_dest_rect.center();
    let center = preview.pixel(cx as u32, cy as u32).unwrap();
    assert!(center.r > 250 && center.b < 5, "{center}");
}

#[test]
fn device_switch_keeps_the_decoded_screenshot() {
    let mut ed = editor();
    ed.add_screenshots([solid(1000, 1000, [0, 128, 0, 255])]);
    let before = Arc::clone(&ed.screenshots().selected().unwrap().image);

    let request = ed.select_device(Platform::Apple, "ipad");
    assert_eq!(request.key, AssetKey::shell("ipad"));

    let after = &ed.screenshots().selected().unwrap().image;
    assert!(Arc::ptr_eq(&before, after));

    let mut recording = RecordingSurface::new();
    ed.render_to(&mut recording, 600, 1200).unwrap();
    let src = recording
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::DrawImage { src, .. } => Some(*src),
            _ => None,
        })
        .unwrap();
    let ipad = device::lookup("ipad");
    assert!((src.w / src.h - ipad.screen_ratio).abs() < 1e-9);
}

#[test]
fn export_rerenders_instead_of_rescaling() {
    let mut ed = editor();
    ed.set_title("Acme");
    ed.set_subtitle("Plan your week");
    ed.add_screenshots([solid(1170, 2532, [9, 9, 9, 255])]);

    let mut preview = RecordingSurface::new();
    let mut export = RecordingSurface::new();
    ed.render_to(&mut preview, 600, 1200).unwrap();
    ed.render_to(&mut export, 1800, 3600).unwrap();
    assert_eq!(preview.ops().len(), export.ops().len());

    for (small, large) in preview.ops().iter().zip(export.ops()) {
        match (small, large) {
            (DrawOp::DrawImage { dst: a, .. }, DrawOp::DrawImage { dst: b, .. })
            | (DrawOp::StrokeRoundRect { rect: a, .. }, DrawOp::StrokeRoundRect { rect: b, .. }) => {
                assert!((b.x - 3.0 * a.x).abs() < 1e-9);
                assert!((b.y - 3.0 * a.y).abs() < 1e-9);
                assert!((b.w - 3.0 * a.w).abs() < 1e-9);
                assert!((b.h - 3.0 * a.h).abs() < 1e-9);
            }
            (DrawOp::FillText { run: a }, DrawOp::FillText { run: b }) => {
                assert_eq!(a.text, b.text);
                assert!((b.font_size - 3.0 * a.font_size).abs() < 1e-9);
                assert!((b.baseline - 3.0 * a.baseline).abs() < 1e-9);
            }
            _ => {}
        }
    }

    let surface = ed.export_at_size(1290, 2796).unwrap();
    assert_eq!(surface.to_rgba_image().dimensions(), (1290, 2796));
}

#[test]
fn preview_scenario_places_screenshot_where_expected() {
    let mut ed = editor();
    ed.add_screenshots([solid(1170, 2532, [0, 0, 0, 255])]);
    let mut recording = RecordingSurface::new();
    let layout = ed.render_to(&mut recording, 600, 1200).unwrap();
    let s = layout.screen_dest_rect;
    assert!((s.x - 100.563_981_042_7).abs() < 1e-6);
    assert!((s.y - 212.445_497_630_3).abs() < 1e-6);
    assert!((s.w - 398.872_037_914_7).abs() < 1e-6);
    assert!((s.h - 863.829_383_886_3).abs() < 1e-6);
}
