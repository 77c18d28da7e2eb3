//! Shotframe CLI: compose app-store listing images from screenshots.
//!
//! Usage:
//!   shotframe devices                 List device shells
//!   shotframe layout [OPTIONS]        Print the solved layout as JSON
//!   shotframe render [OPTIONS]        Render the live preview to PNG
//!   shotframe export [OPTIONS]        Export one size
//!   shotframe batch [OPTIONS]         Export the store sizes plus a manifest
//!   shotframe favicon [OPTIONS]       Derive a 32x32 favicon from the preview
//!   shotframe plan [OPTIONS]          Print the draw calls of one render
//!   shotframe crop <SRC> <OUT>        Crop a folder of images to a store preset

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shotframe_common::config::AppConfig;

mod commands;

use commands::ListingArgs;

#[derive(Parser)]
#[command(
    name = "shotframe",
    about = "Compose device-framed listing images for app stores",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/shotframe/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the device shells
    Devices,

    /// Solve the layout for a canvas size and print it as JSON
    Layout {
        /// Canvas width
        #[arg(long, default_value = "600")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "1200")]
        height: u32,

        /// Device key
        #[arg(long, default_value = "iphone")]
        device: String,

        /// Render style file (JSON)
        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// Render the live preview to preview.png
    Render {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Export a single image
    Export {
        #[command(flatten)]
        listing: ListingArgs,

        /// Output width (with --height)
        #[arg(long, requires = "height", conflicts_with = "preset")]
        width: Option<u32>,

        /// Output height (with --width)
        #[arg(long, requires = "width", conflicts_with = "preset")]
        height: Option<u32>,

        /// Store preset id, e.g. iphone-15-pro
        #[arg(long)]
        preset: Option<String>,
    },

    /// Export the 6.7" and 5.5" store sizes and a manifest
    Batch {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Write favicon.png derived from the preview
    Favicon {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Print the draw calls of one render as JSON
    Plan {
        #[command(flatten)]
        listing: ListingArgs,

        /// Target width (defaults to the preview width)
        #[arg(long)]
        width: Option<u32>,

        /// Target height (defaults to the preview height)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Center-crop every PNG/JPEG in a folder to a store preset
    Crop {
        /// Source folder
        src: PathBuf,

        /// Output folder
        out: PathBuf,

        /// Store preset id
        #[arg(long)]
        preset: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };
    config.validate()?;

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    shotframe_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Devices => commands::devices::run(),
        Commands::Layout {
            width,
            height,
            device,
            style,
        } => commands::layout::run(width, height, device, style),
        Commands::Render { listing } => commands::render::run(&config, listing).await,
        Commands::Export {
            listing,
            width,
            height,
            preset,
        } => commands::export::run(&config, listing, width, height, preset).await,
        Commands::Batch { listing } => commands::batch::run(&config, listing).await,
        Commands::Favicon { listing } => commands::favicon::run(&config, listing).await,
        Commands::Plan {
            listing,
            width,
            height,
        } => commands::plan::run(&config, listing, width, height).await,
        Commands::Crop { src, out, preset } => commands::crop::run(src, out, preset),
    }
}
