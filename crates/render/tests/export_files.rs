use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use shotframe_common::config::PreviewConfig;
use shotframe_model::presets::BATCH_EXPORT_SIZES;
use shotframe_render::export::{export_batch, export_favicon, export_single, MANIFEST_FILE};
use shotframe_render::{FontSet, ListingEditor, RenderStyle};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shotframe_test_files_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn editor() -> ListingEditor {
    let mut ed = ListingEditor::new(
        &PreviewConfig::default(),
        RenderStyle::default(),
        FontSet::default(),
    )
    .unwrap();
    ed.set_title("Acme Tasks");
    ed.add_screenshots([RgbaImage::from_pixel(117, 253, Rgba([40, 80, 120, 255]))]);
    ed
}

#[test]
fn batch_writes_default_sizes_and_manifest() {
    let dir = scratch("batch");
    let manifest = export_batch(&editor(), &dir, &BATCH_EXPORT_SIZES).unwrap();

    let files: Vec<&str> = manifest.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(
        files,
        vec!["listing_6.7_1290x2796.png", "listing_5.5_1242x2208.png"]
    );
    for entry in &manifest.files {
        let img = image::open(dir.join(&entry.file)).unwrap();
        assert_eq!((img.width(), img.height()), (entry.width, entry.height));
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(json["device"], "iphone");
    assert_eq!(json["files"][1]["key"], "5.5");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn single_export_is_timestamped() {
    let dir = scratch("single");
    let path = export_single(&editor(), &dir, 1242, 2208).unwrap().unwrap();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("listing_1242x2208_"), "{name}");
    assert!(name.ends_with(".png"));
    let stamp = &name["listing_1242x2208_".len()..name.len() - 4];
    assert!(stamp.parse::<i64>().is_ok(), "{stamp}");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn favicon_is_written_at_32px() {
    let dir = scratch("favicon");
    let mut ed = editor();
    let path = export_favicon(&mut ed, &dir).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), "favicon.png");
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (32, 32));
    std::fs::remove_dir_all(&dir).ok();
}
