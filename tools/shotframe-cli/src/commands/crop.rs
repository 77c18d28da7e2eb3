//! Crop a folder of images to a store preset.

use std::path::PathBuf;

use shotframe_model::presets::{store_preset, STORE_PRESETS};
use shotframe_render::export::batch_crop;

pub fn run(src: PathBuf, out: PathBuf, preset: String) -> anyhow::Result<()> {
    let preset = store_preset(&preset).map_err(|e| {
        let ids: Vec<&str> = STORE_PRESETS.iter().map(|p| p.id).collect();
        anyhow::anyhow!("{e}. Use one of: {}", ids.join(", "))
    })?;
    if !src.is_dir() {
        anyhow::bail!("Source folder not found: {}", src.display());
    }

    println!(
        "Cropping {} to {} ({}x{})",
        src.display(),
        preset.name,
        preset.width,
        preset.height
    );
    let written = batch_crop(&src, &out, preset)?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("{} image(s) written to {}", written.len(), out.display());
    Ok(())
}
