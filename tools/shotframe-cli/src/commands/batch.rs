//! Export the store sizes in one go.

use shotframe_common::config::AppConfig;
use shotframe_model::presets::BATCH_EXPORT_SIZES;
use shotframe_render::export::{export_batch, MANIFEST_FILE};

use super::{prepare_editor, ListingArgs};

pub async fn run(config: &AppConfig, listing: ListingArgs) -> anyhow::Result<()> {
    let editor = prepare_editor(config, &listing).await?;
    let out_dir = listing.out_dir(config);

    let manifest = export_batch(&editor, &out_dir, &BATCH_EXPORT_SIZES)?;
    for entry in &manifest.files {
        println!("  {:<8} {}", entry.name, entry.file);
    }
    println!(
        "{} of {} sizes exported to {} ({MANIFEST_FILE})",
        manifest.files.len(),
        BATCH_EXPORT_SIZES.len(),
        out_dir.display()
    );
    Ok(())
}
