//! Export to PNG files.
//!
//! Every export renders the editor state from scratch at the requested
//! size; nothing is upscaled from the preview.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use shotframe_common::{ShotframeError, ShotframeResult};
use shotframe_layout::cover::cover_crop_box;
use shotframe_model::{ExportSize, StorePreset};

use crate::raster::PixmapSurface;
use crate::session::ListingEditor;

/// Edge length of the generated favicon.
pub const FAVICON_SIZE: u32 = 32;

pub const FAVICON_FILE: &str = "favicon.png";

pub const MANIFEST_FILE: &str = "manifest.json";

/// One file written by [`export_batch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub key: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub file: String,
}

/// Contents of `manifest.json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchManifest {
    pub generated_at: DateTime<Utc>,
    pub device: String,
    pub files: Vec<ManifestEntry>,
}

pub fn single_export_name(width: u32, height: u32, timestamp_ms: i64) -> String {
    format!("listing_{width}x{height}_{timestamp_ms}.png")
}

pub fn batch_export_name(key: &str, width: u32, height: u32) -> String {
    format!("listing_{key}_{width}x{height}.png")
}

pub fn crop_output_name(stem: &str, preset: &StorePreset) -> String {
    format!("{stem}_{}_{}x{}.png", preset.id, preset.width, preset.height)
}

/// PNG-encode straight-alpha pixels. Encoder failures are logged and
/// reported as `None`.
pub fn encode_image(image: &RgbaImage) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    match image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png) {
        Ok(()) => Some(bytes),
        Err(e) => {
            tracing::error!(
                width = image.width(),
                height = image.height(),
                error = %e,
                "PNG encoding failed"
            );
            None
        }
    }
}

/// PNG-encode a rendered surface.
pub fn encode_png(surface: &PixmapSurface) -> Option<Vec<u8>> {
    encode_image(&surface.to_rgba_image())
}

fn write_failed(path: &Path, e: std::io::Error) -> ShotframeError {
    ShotframeError::export(format!("Cannot write {}: {e}", path.display()))
}

fn create_output_dir(dir: &Path) -> ShotframeResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| write_failed(dir, e))
}

fn write_png(path: &Path, image: &RgbaImage) -> ShotframeResult<bool> {
    let Some(bytes) = encode_image(image) else {
        return Ok(false);
    };
    std::fs::write(path, bytes).map_err(|e| write_failed(path, e))?;
    Ok(true)
}

/// Render one `width` x `height` image into `dir`.
///
/// Returns `None` when encoding failed; the failure is logged and nothing
/// is written.
pub fn export_single(
    editor: &ListingEditor,
    dir: &Path,
    width: u32,
    height: u32,
) -> ShotframeResult<Option<PathBuf>> {
    create_output_dir(dir)?;
    let surface = editor.export_at_size(width, height)?;
    let path = dir.join(single_export_name(
        width,
        height,
        Utc::now().timestamp_millis(),
    ));
    if !write_png(&path, &surface.to_rgba_image())? {
        return Ok(None);
    }
    tracing::info!(path = %path.display(), width, height, "Exported listing image");
    Ok(Some(path))
}

/// Render every size in turn and write a manifest of what was produced.
pub fn export_batch(
    editor: &ListingEditor,
    dir: &Path,
    sizes: &[ExportSize],
) -> ShotframeResult<BatchManifest> {
    create_output_dir(dir)?;
    let mut files = Vec::with_capacity(sizes.len());

    for size in sizes {
        let surface = editor.export_at_size(size.width, size.height)?;
        let file = batch_export_name(size.key, size.width, size.height);
        if !write_png(&dir.join(&file), &surface.to_rgba_image())? {
            tracing::warn!(size = size.key, "Skipping size after encoder failure");
            continue;
        }
        tracing::info!(file = %file, "Exported batch size");
        files.push(ManifestEntry {
            key: size.key.to_string(),
            name: size.name.to_string(),
            width: size.width,
            height: size.height,
            file,
        });
    }

    let manifest = BatchManifest {
        generated_at: Utc::now(),
        device: editor.device().key.clone(),
        files,
    };
    let manifest_path = dir.join(MANIFEST_FILE);
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .map_err(|e| write_failed(&manifest_path, e))?;
    tracing::info!(
        dir = %dir.display(),
        count = manifest.files.len(),
        "Batch export complete"
    );
    Ok(manifest)
}

/// Crop the square `(0.2w, 0.05h, 0.6w, 0.6w)` out of the preview and shrink
/// it to a [`FAVICON_SIZE`] icon. The square is clipped to the image.
pub fn favicon_from_preview(preview: &RgbaImage) -> RgbaImage {
    let (w, h) = preview.dimensions();
    let x = ((w as f64 * 0.2) as u32).min(w.saturating_sub(1));
    let y = ((h as f64 * 0.05) as u32).min(h.saturating_sub(1));
    let side = ((w as f64 * 0.6) as u32)
        .min(w - x)
        .min(h - y)
        .max(1);
    let square = imageops::crop_imm(preview, x, y, side, side).to_image();
    imageops::resize(&square, FAVICON_SIZE, FAVICON_SIZE, FilterType::Lanczos3)
}

/// Refresh the preview and write `favicon.png` into `dir`.
pub fn export_favicon(editor: &mut ListingEditor, dir: &Path) -> ShotframeResult<Option<PathBuf>> {
    create_output_dir(dir)?;
    let preview = editor.render_preview()?.to_rgba_image();
    let icon = favicon_from_preview(&preview);
    let path = dir.join(FAVICON_FILE);
    if !write_png(&path, &icon)? {
        return Ok(None);
    }
    tracing::info!(path = %path.display(), "Exported favicon");
    Ok(Some(path))
}

/// Center-crop `image` to the aspect of `width` x `height`, then resize.
pub fn center_crop_and_resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (x, y, w, h) = cover_crop_box(image.width(), image.height(), width, height);
    let cropped = imageops::crop_imm(image, x, y, w, h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

fn is_crop_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or(false)
}

/// Crop every PNG/JPEG in `src_dir` to `preset` and write the results to
/// `out_dir`. Files that fail to decode are skipped with a warning.
pub fn batch_crop(src_dir: &Path, out_dir: &Path, preset: &StorePreset) -> ShotframeResult<Vec<PathBuf>> {
    create_output_dir(out_dir)?;

    let mut sources: Vec<PathBuf> = std::fs::read_dir(src_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_crop_source(path))
        .collect();
    sources.sort();

    let mut written = Vec::new();
    for source in sources {
        let image = match image::open(&source) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                tracing::warn!(path = %source.display(), error = %e, "Skipping undecodable image");
                continue;
            }
        };
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let out = out_dir.join(crop_output_name(stem, preset));
        let resized = center_crop_and_resize(&image, preset.width, preset.height);
        if write_png(&out, &resized)? {
            tracing::debug!(from = %source.display(), to = %out.display(), "Cropped");
            written.push(out);
        }
    }

    tracing::info!(
        preset = preset.id,
        count = written.len(),
        out_dir = %out_dir.display(),
        "Batch crop complete"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use shotframe_model::presets::store_preset;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shotframe_test_export_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            single_export_name(1290, 2796, 1700000000123),
            "listing_1290x2796_1700000000123.png"
        );
        assert_eq!(batch_export_name("5.5", 1242, 2208), "listing_5.5_1242x2208.png");
        let preset = store_preset("android-icon").unwrap();
        assert_eq!(crop_output_name("home", preset), "home_android-icon_512x512.png");
    }

    #[test]
    fn test_encode_image_is_png() {
        let bytes = encode_image(&RgbaImage::new(3, 3)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 3));
    }

    #[test]
    fn test_favicon_is_32_square() {
        let preview = RgbaImage::from_pixel(600, 1200, Rgba([10, 20, 30, 255]));
        let icon = favicon_from_preview(&preview);
        assert_eq!(icon.dimensions(), (FAVICON_SIZE, FAVICON_SIZE));
        let px = icon.get_pixel(16, 16).0;
        assert!((px[0] as i32 - 10).abs() <= 1 && (px[2] as i32 - 30).abs() <= 1);
    }

    #[test]
    fn test_favicon_crop_clipped_on_wide_preview() {
        let preview = RgbaImage::new(1000, 100);
        assert_eq!(favicon_from_preview(&preview).dimensions(), (32, 32));
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        // Red bars on both sides of a green center; a square crop keeps green.
        let image = RgbaImage::from_fn(300, 100, |x, _| {
            if (100..200).contains(&x) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        });
        let out = center_crop_and_resize(&image, 50, 50);
        assert_eq!(out.dimensions(), (50, 50));
        let px = out.get_pixel(25, 25).0;
        assert!(px[1] > 250 && px[0] < 5);
    }

    #[test]
    fn test_batch_crop_skips_undecodable() {
        let src = scratch("crop_src");
        let out = scratch("crop_out");
        RgbaImage::from_pixel(40, 80, Rgba([1, 2, 3, 255]))
            .save(src.join("a.png"))
            .unwrap();
        std::fs::write(src.join("b.jpg"), b"not a jpeg").unwrap();
        std::fs::write(src.join("notes.txt"), b"ignored").unwrap();

        let preset = store_preset("ios-icon").unwrap();
        let written = batch_crop(&src, &out, preset).unwrap();
        assert_eq!(written, vec![out.join("a_ios-icon_1024x1024.png")]);
        let img = image::open(&written[0]).unwrap();
        assert_eq!((img.width(), img.height()), (1024, 1024));

        std::fs::remove_dir_all(&src).ok();
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_unwritable_output_is_export_error() {
        let dir = scratch("blocked");
        // A regular file where the output directory should be.
        let blocked = dir.join("out");
        std::fs::write(&blocked, b"file").unwrap();

        let preset = store_preset("ios-icon").unwrap();
        let err = batch_crop(&dir, &blocked, preset).unwrap_err();
        assert!(matches!(err, ShotframeError::Export { .. }), "{err}");
        assert!(err.to_string().contains("out"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
