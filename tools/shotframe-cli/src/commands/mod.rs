pub mod batch;
pub mod crop;
pub mod devices;
pub mod export;
pub mod favicon;
pub mod layout;
pub mod plan;
pub mod render;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use shotframe_common::config::AppConfig;
use shotframe_model::{BackgroundSpec, Platform};
use shotframe_render::loader::load_screenshot;
use shotframe_render::{AssetLoader, FontSet, ListingEditor, RenderStyle};

/// Inputs shared by every command that renders a listing.
#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    /// Screenshot to stage (PNG or JPEG); repeat for several
    #[arg(short, long = "screenshot")]
    pub screenshots: Vec<PathBuf>,

    /// Zero-based index of the screenshot to show
    #[arg(long, default_value = "0")]
    pub select: usize,

    /// Title line (max 30 characters)
    #[arg(long, default_value = "")]
    pub title: String,

    /// Subtitle line (max 50 characters)
    #[arg(long, default_value = "")]
    pub subtitle: String,

    /// Background: preset:<0-5>, solid:#hex, gradient:#from:#to[:deg] or a preset name
    #[arg(long, default_value = "preset:0")]
    pub background: String,

    /// Target platform: apple|android
    #[arg(long, default_value = "apple")]
    pub platform: Platform,

    /// Device key: iphone|ipad|android
    #[arg(long, default_value = "iphone")]
    pub device: String,

    /// Output directory (defaults to the configured output_dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Render style file (JSON)
    #[arg(long)]
    pub style: Option<PathBuf>,
}

impl ListingArgs {
    pub fn out_dir(&self, config: &AppConfig) -> PathBuf {
        self.out.clone().unwrap_or_else(|| config.output_dir.clone())
    }
}

pub fn load_style(path: Option<&Path>) -> anyhow::Result<RenderStyle> {
    match path {
        Some(path) => RenderStyle::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load style {}: {e}", path.display())),
        None => Ok(RenderStyle::default()),
    }
}

/// Build an editor from the command line and wait for its assets.
///
/// Loads that are still pending after `asset_timeout_ms` are left behind;
/// the render then uses fallbacks for them.
pub async fn prepare_editor(
    config: &AppConfig,
    args: &ListingArgs,
) -> anyhow::Result<ListingEditor> {
    let style = load_style(args.style.as_deref())?;
    let fonts = FontSet::load(&config.fonts);
    let mut editor = ListingEditor::new(&config.preview, style, fonts)?;

    editor.set_title(&args.title);
    editor.set_subtitle(&args.subtitle);

    let mut requests = Vec::new();
    let background: BackgroundSpec = args
        .background
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid --background: {e}"))?;
    requests.extend(editor.set_background(background));
    requests.push(editor.select_device(args.platform, &args.device));
    requests.extend(editor.preload());

    let mut images = Vec::with_capacity(args.screenshots.len());
    for path in &args.screenshots {
        let image = load_screenshot(path)
            .map_err(|e| anyhow::anyhow!("Rejected screenshot {}: {e}", path.display()))?;
        images.push(image);
    }
    editor.add_screenshots(images);
    editor.select_screenshot(args.select);

    let (loader, mut rx) = AssetLoader::channel(&config.assets_dir);
    let _decodes: Vec<_> = requests.into_iter().map(|r| loader.dispatch(r)).collect();

    let deadline = tokio::time::Instant::now() + Duration::from_millis(config.asset_timeout_ms);
    editor.pump(&mut rx, deadline).await?;

    tracing::debug!(
        device = %editor.device().key,
        screenshots = editor.screenshots().len(),
        pending_assets = editor.assets().pending(),
        "Editor ready"
    );
    Ok(editor)
}
