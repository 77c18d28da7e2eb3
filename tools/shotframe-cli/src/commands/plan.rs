//! Print the draw calls of one render.

use shotframe_common::config::AppConfig;
use shotframe_render::RecordingSurface;

use super::{prepare_editor, ListingArgs};

pub async fn run(
    config: &AppConfig,
    listing: ListingArgs,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<()> {
    let editor = prepare_editor(config, &listing).await?;
    let width = width.unwrap_or(config.preview.width);
    let height = height.unwrap_or(config.preview.height);

    let mut surface = RecordingSurface::new();
    editor.render_to(&mut surface, width, height)?;
    println!("{}", serde_json::to_string_pretty(surface.ops())?);
    Ok(())
}
