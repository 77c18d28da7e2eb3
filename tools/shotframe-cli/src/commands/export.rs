//! Export a single listing image.

use shotframe_common::config::AppConfig;
use shotframe_model::presets::store_preset;
use shotframe_render::export::export_single;

use super::{prepare_editor, ListingArgs};

pub async fn run(
    config: &AppConfig,
    listing: ListingArgs,
    width: Option<u32>,
    height: Option<u32>,
    preset: Option<String>,
) -> anyhow::Result<()> {
    let (width, height) = match (preset, width, height) {
        (Some(id), _, _) => {
            let preset = store_preset(&id).map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Preset: {} ({})", preset.name, preset.purpose);
            (preset.width, preset.height)
        }
        (None, Some(w), Some(h)) => (w, h),
        _ => anyhow::bail!("Pass --width and --height, or --preset"),
    };

    let editor = prepare_editor(config, &listing).await?;
    let out_dir = listing.out_dir(config);
    match export_single(&editor, &out_dir, width, height)? {
        Some(path) => println!("Exported {width}x{height}: {}", path.display()),
        None => anyhow::bail!("Export of {width}x{height} failed to encode"),
    }
    Ok(())
}
