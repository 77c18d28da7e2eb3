//! Asset decoding off the editor task.
//!
//! Shell artwork and background textures decode on tokio's blocking pool.
//! Each completion is sent back as an [`AssetEvent`] tagged with the
//! generation it was requested under; the editor drops events whose
//! generation has since been superseded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use shotframe_common::{ShotframeError, ShotframeResult};
use shotframe_model::background::texture_asset_path;
use shotframe_model::{device, AssetKey, DeviceProfile};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Vector shells are rasterized at this multiple of their design size.
pub const SVG_RASTER_SCALE: f64 = 3.0;

/// A load the caller must dispatch to keep the editor's assets current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub key: AssetKey,
    pub generation: u64,
}

/// Outcome of one load.
#[derive(Debug, Clone)]
pub struct AssetEvent {
    pub key: AssetKey,
    pub generation: u64,
    pub result: Result<Arc<RgbaImage>, String>,
}

/// Spawns decodes and reports them on an unbounded channel.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
    tx: UnboundedSender<AssetEvent>,
}

impl AssetLoader {
    /// Loader resolving asset paths against `root`.
    pub fn new(root: impl Into<PathBuf>, tx: UnboundedSender<AssetEvent>) -> Self {
        Self {
            root: root.into(),
            tx,
        }
    }

    /// Loader plus the receiving end of its event channel.
    pub fn channel(root: impl Into<PathBuf>) -> (Self, UnboundedReceiver<AssetEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self::new(root, tx), rx)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dispatch(&self, request: AssetRequest) -> JoinHandle<()> {
        match request.key {
            AssetKey::Shell(key) => self.load_shell(device::lookup(&key), request.generation),
            AssetKey::Texture(index) => self.load_texture(index, request.generation),
        }
    }

    pub fn load_shell(&self, device: &DeviceProfile, generation: u64) -> JoinHandle<()> {
        let root = self.root.clone();
        let device = device.clone();
        self.spawn(device.shell_key(), generation, move || {
            decode_shell(&root, &device)
        })
    }

    pub fn load_texture(&self, index: usize, generation: u64) -> JoinHandle<()> {
        let path = self.root.join(texture_asset_path(index));
        self.spawn(AssetKey::Texture(index), generation, move || {
            decode_raster(&path)
        })
    }

    fn spawn<F>(&self, key: AssetKey, generation: u64, decode: F) -> JoinHandle<()>
    where
        F: FnOnce() -> ShotframeResult<RgbaImage> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = match decode() {
                Ok(image) => {
                    tracing::debug!(
                        key = %key,
                        generation,
                        width = image.width(),
                        height = image.height(),
                        "Asset decoded"
                    );
                    Ok(Arc::new(image))
                }
                Err(e) => {
                    tracing::warn!(key = %key, generation, error = %e, "Asset failed to load");
                    Err(e.to_string())
                }
            };
            if tx
                .send(AssetEvent {
                    key,
                    generation,
                    result,
                })
                .is_err()
            {
                tracing::debug!("Asset receiver dropped");
            }
        })
    }
}

/// Decode a device shell, preferring the raster artwork over the vector one.
pub fn decode_shell(root: &Path, device: &DeviceProfile) -> ShotframeResult<RgbaImage> {
    let raster = root.join(&device.shell.raster);
    if raster.exists() {
        match decode_raster(&raster) {
            Ok(image) => return Ok(image),
            Err(e) => {
                tracing::warn!(path = %raster.display(), error = %e, "Raster shell unusable");
            }
        }
    }

    let vector = root.join(&device.shell.vector);
    if vector.exists() {
        let width = (device.frame_size.w * SVG_RASTER_SCALE).round() as u32;
        let height = (device.frame_size.h * SVG_RASTER_SCALE).round() as u32;
        return rasterize_svg(&vector, width, height);
    }

    Err(ShotframeError::asset(format!(
        "No shell artwork for {} under {}",
        device.key,
        root.display()
    )))
}

pub fn decode_raster(path: &Path) -> ShotframeResult<RgbaImage> {
    if !path.exists() {
        return Err(ShotframeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let image = image::open(path)
        .map_err(|e| ShotframeError::asset(format!("{}: {e}", path.display())))?;
    Ok(image.to_rgba8())
}

/// Rasterize an SVG into a `width` x `height` image, fitted and centered.
pub fn rasterize_svg(path: &Path, width: u32, height: u32) -> ShotframeResult<RgbaImage> {
    let data = std::fs::read(path)?;
    let mut options = usvg::Options::default();
    options.resources_dir = path.parent().map(Path::to_path_buf);
    let tree = usvg::Tree::from_data(&data, &options)
        .map_err(|e| ShotframeError::asset(format!("{}: {e}", path.display())))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ShotframeError::asset(format!("Cannot allocate {width}x{height} for {}", path.display()))
    })?;

    let size = tree.size();
    let scale = (width as f32 / size.width()).min(height as f32 / size.height());
    let x_offset = (width as f32 - size.width() * scale) / 2.0;
    let y_offset = (height as f32 - size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(x_offset, y_offset);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // resvg writes premultiplied pixels.
    let pixels = pixmap.pixels();
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    }))
}

/// Decode a user screenshot. Only PNG and JPEG content is accepted.
pub fn load_screenshot(path: &Path) -> ShotframeResult<RgbaImage> {
    if !path.exists() {
        return Err(ShotframeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes).map_err(|_| {
        ShotframeError::invalid_input(format!("{} is not a recognizable image", path.display()))
    })?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(ShotframeError::invalid_input(format!(
            "{} is {format:?}; screenshots must be PNG or JPEG",
            path.display()
        )));
    }
    let image = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
        ShotframeError::invalid_input(format!("{} could not be decoded: {e}", path.display()))
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Screenshot decoded"
    );
    Ok(image.to_rgba8())
}
