//! Render the live preview.

use shotframe_common::config::AppConfig;
use shotframe_render::export::encode_png;

use super::{prepare_editor, ListingArgs};

pub async fn run(config: &AppConfig, listing: ListingArgs) -> anyhow::Result<()> {
    let mut editor = prepare_editor(config, &listing).await?;
    let out_dir = listing.out_dir(config);
    std::fs::create_dir_all(&out_dir)?;

    let preview = editor.render_preview()?;
    let Some(bytes) = encode_png(preview) else {
        anyhow::bail!("Preview could not be encoded");
    };
    let path = out_dir.join("preview.png");
    std::fs::write(&path, bytes)?;

    println!(
        "Preview {}x{} written to {}",
        config.preview.width,
        config.preview.height,
        path.display()
    );
    Ok(())
}
