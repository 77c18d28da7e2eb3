//! Editor session.
//!
//! [`ListingEditor`] owns everything the composite depends on and is mutated
//! only by the task driving it. Asset decodes happen elsewhere; their
//! results come back through [`ListingEditor::apply`].

use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;
use shotframe_common::config::PreviewConfig;
use shotframe_common::{ShotframeError, ShotframeResult};
use shotframe_layout::LayoutResult;
use shotframe_model::background::{palette_entry, PALETTE_LEN};
use shotframe_model::state::{clamp_text, SUBTITLE_MAX_CHARS, TITLE_MAX_CHARS};
use shotframe_model::{
    device, AssetKey, AssetStore, BackgroundSpec, DeviceProfile, LoadState, Platform,
    RenderState, ScreenshotSet,
};

use crate::compositor::render;
use crate::loader::{AssetEvent, AssetRequest};
use crate::raster::{FontSet, PixmapSurface};
use crate::style::RenderStyle;
use crate::surface::Surface;

/// Which background the user picked.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundChoice {
    /// Index into the built-in palette.
    Palette(usize),
    Custom(BackgroundSpec),
}

impl BackgroundChoice {
    pub fn spec(&self) -> &BackgroundSpec {
        match self {
            BackgroundChoice::Palette(index) => palette_entry(*index),
            BackgroundChoice::Custom(spec) => spec,
        }
    }
}

/// State of one listing being edited, plus its live preview.
#[derive(Debug)]
pub struct ListingEditor {
    title: String,
    subtitle: String,
    background: BackgroundChoice,
    platform: Platform,
    device: &'static DeviceProfile,
    screenshots: ScreenshotSet,
    assets: AssetStore,
    style: RenderStyle,
    preview_size: (u32, u32),
    preview: PixmapSurface,
    dirty: bool,
}

impl ListingEditor {
    /// Create an editor with the default device and the first palette entry.
    pub fn new(preview: &PreviewConfig, style: RenderStyle, fonts: FontSet) -> ShotframeResult<Self> {
        if preview.width == 0 || preview.height == 0 {
            return Err(ShotframeError::config("Preview size must be non-zero"));
        }
        let device = device::lookup(device::DEFAULT_DEVICE);
        Ok(Self {
            title: String::new(),
            subtitle: String::new(),
            background: BackgroundChoice::Palette(0),
            platform: device.platform,
            device,
            screenshots: ScreenshotSet::new(),
            assets: AssetStore::new(),
            style,
            preview_size: (preview.width, preview.height),
            preview: PixmapSurface::new(preview.width, preview.height, fonts)?,
            dirty: true,
        })
    }

    /// Loads for the current shell and every palette texture that have not
    /// been requested yet.
    ///
    /// Call after the initial selections and dispatch the returned requests.
    pub fn preload(&mut self) -> Vec<AssetRequest> {
        let keys = std::iter::once(self.device.shell_key())
            .chain((0..PALETTE_LEN).map(AssetKey::Texture));
        let mut requests = Vec::new();
        for key in keys {
            if self.assets.generation(&key) == 0 {
                requests.push(self.begin_load(key));
            }
        }
        requests
    }

    fn begin_load(&mut self, key: AssetKey) -> AssetRequest {
        let generation = self.assets.begin(key.clone());
        AssetRequest { key, generation }
    }

    /// Request the texture behind the current background if nothing has
    /// been requested for it yet.
    fn request_texture(&mut self) -> Option<AssetRequest> {
        let key = self.background.spec().texture_key()?.clone();
        if self.assets.generation(&key) == 0 {
            Some(self.begin_load(key))
        } else {
            None
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = clamp_text(title, TITLE_MAX_CHARS);
        self.dirty = true;
    }

    pub fn set_subtitle(&mut self, subtitle: &str) {
        self.subtitle = clamp_text(subtitle, SUBTITLE_MAX_CHARS);
        self.dirty = true;
    }

    /// Pick a palette entry; out-of-range indices clamp to the last one.
    pub fn set_background_index(&mut self, index: usize) -> Option<AssetRequest> {
        self.background = BackgroundChoice::Palette(index.min(PALETTE_LEN - 1));
        self.dirty = true;
        self.request_texture()
    }

    pub fn set_background(&mut self, spec: BackgroundSpec) -> Option<AssetRequest> {
        self.background = BackgroundChoice::Custom(spec);
        self.dirty = true;
        self.request_texture()
    }

    /// Switch the device shell.
    ///
    /// The shell load generation is bumped so an in-flight load for the old
    /// selection cannot land. Staged screenshots are kept as they are; only
    /// the crop aspect changes with the new device.
    pub fn select_device(&mut self, platform: Platform, device_key: &str) -> AssetRequest {
        let device = device::resolve(platform, device_key);
        tracing::debug!(from = %self.device.key, to = %device.key, "Device selected");
        self.platform = platform;
        self.device = device;
        self.dirty = true;
        self.begin_load(device.shell_key())
    }

    pub fn add_screenshots(&mut self, images: impl IntoIterator<Item = RgbaImage>) -> Vec<u64> {
        let ids = self.screenshots.extend(images.into_iter().map(Arc::new));
        if !ids.is_empty() {
            self.dirty = true;
        }
        ids
    }

    pub fn replace_screenshot(&mut self, index: usize, image: RgbaImage) -> ShotframeResult<()> {
        self.screenshots
            .replace(index, Arc::new(image))
            .map_err(|e| ShotframeError::invalid_input(e.to_string()))?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_screenshot(&mut self, index: usize) -> ShotframeResult<()> {
        self.screenshots
            .remove(index)
            .map_err(|e| ShotframeError::invalid_input(e.to_string()))?;
        self.dirty = true;
        Ok(())
    }

    pub fn select_screenshot(&mut self, index: usize) {
        self.screenshots.select(index);
        self.dirty = true;
    }

    /// Record a finished load.
    ///
    /// Returns true when the preview must be re-rendered: the event is
    /// current and concerns the shell or texture on screen.
    pub fn apply(&mut self, event: AssetEvent) -> bool {
        let AssetEvent {
            key,
            generation,
            result,
        } = event;
        if !self.assets.complete(&key, generation, result) {
            tracing::warn!(
                key = %key,
                generation,
                current = self.assets.generation(&key),
                "Ignoring stale asset event"
            );
            return false;
        }
        if let Some(LoadState::Failed { reason }) = self.assets.state(&key) {
            tracing::debug!(key = %key, reason = %reason, "Asset degraded to fallback");
        }

        let visible = key == self.device.shell_key()
            || self.background.spec().texture_key() == Some(&key);
        if visible {
            self.dirty = true;
        }
        visible
    }

    /// Drive the editor from loader events until nothing is pending, the
    /// channel closes or `deadline` passes.
    ///
    /// The preview is re-rendered whenever an event changes what is on
    /// screen. Returns how many preview renders happened.
    pub async fn pump(
        &mut self,
        rx: &mut UnboundedReceiver<AssetEvent>,
        deadline: Instant,
    ) -> ShotframeResult<usize> {
        let mut renders = 0;
        if self.needs_render() {
            self.render_preview()?;
            renders += 1;
        }
        while self.assets.pending() > 0 {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(event)) => {
                    if self.apply(event) {
                        self.render_preview()?;
                        renders += 1;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        pending = self.assets.pending(),
                        "Timed out waiting for assets; rendering with fallbacks"
                    );
                    break;
                }
            }
        }
        Ok(renders)
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            title: &self.title,
            subtitle: &self.subtitle,
            background: self.background.spec(),
            device: self.device,
            screenshot: self.screenshots.selected(),
        }
    }

    /// Re-render the live preview.
    pub fn render_preview(&mut self) -> ShotframeResult<&PixmapSurface> {
        let state = RenderState {
            title: &self.title,
            subtitle: &self.subtitle,
            background: self.background.spec(),
            device: self.device,
            screenshot: self.screenshots.selected(),
        };
        let (width, height) = self.preview_size;
        render(&mut self.preview, width, height, &state, &self.assets, &self.style)?;
        self.dirty = false;
        Ok(&self.preview)
    }

    /// Render the current state onto any surface.
    pub fn render_to<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) -> ShotframeResult<LayoutResult> {
        render(surface, width, height, &self.render_state(), &self.assets, &self.style)
    }

    /// Render from scratch into a fresh `width` x `height` pixmap.
    ///
    /// Nothing is resampled from the preview, so exports are sharp at any
    /// size.
    pub fn export_at_size(&self, width: u32, height: u32) -> ShotframeResult<PixmapSurface> {
        if width == 0 || height == 0 {
            return Err(ShotframeError::invalid_input(format!(
                "Export size must be non-zero, got {width}x{height}"
            )));
        }
        let mut surface = PixmapSurface::new(width, height, self.preview.fonts().clone())?;
        self.render_to(&mut surface, width, height)?;
        Ok(surface)
    }

    pub fn needs_render(&self) -> bool {
        self.dirty
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn background(&self) -> &BackgroundChoice {
        &self.background
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn device(&self) -> &'static DeviceProfile {
        self.device
    }

    pub fn screenshots(&self) -> &ScreenshotSet {
        &self.screenshots
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn preview(&self) -> &PixmapSurface {
        &self.preview
    }
}
