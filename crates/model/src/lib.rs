//! Shotframe Model
//!
//! Defines the data the listing compositor works from:
//! - **Devices:** Static registry of mockup shells and their screen regions
//! - **Backgrounds:** Solid, gradient and texture fills plus the built-in palettes
//! - **Screenshots:** Staged decoded images with a single selection
//! - **Assets:** Load state of asynchronously decoded shells and textures
//! - **Presets:** Batch export sizes and app-store size requirements
//!
//! Device screen regions are normalized to `[0.0, 1.0]` of the shell so the
//! same profile lays out identically at every output resolution.

pub mod assets;
pub mod background;
pub mod device;
pub mod error;
pub mod geometry;
pub mod presets;
pub mod screenshot;
pub mod state;

pub use assets::*;
pub use background::{BackgroundSpec, Color, TextureBackground};
pub use device::{DeviceProfile, Platform, ShellAsset};
pub use error::ModelError;
pub use geometry::*;
pub use presets::{ExportSize, StorePreset};
pub use screenshot::{Screenshot, ScreenshotSet};
pub use state::RenderState;
