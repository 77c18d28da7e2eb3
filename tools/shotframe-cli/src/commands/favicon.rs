//! Favicon from the preview.

use shotframe_common::config::AppConfig;
use shotframe_render::export::export_favicon;

use super::{prepare_editor, ListingArgs};

pub async fn run(config: &AppConfig, listing: ListingArgs) -> anyhow::Result<()> {
    let mut editor = prepare_editor(config, &listing).await?;
    match export_favicon(&mut editor, &listing.out_dir(config))? {
        Some(path) => println!("Favicon written to {}", path.display()),
        None => anyhow::bail!("Favicon failed to encode"),
    }
    Ok(())
}
