//! Shotframe Render
//!
//! Turns the editor state into pixels. One compositor drives every output,
//! so the live preview and each export size go through the same passes:
//!
//! ```text
//! reset ──► background ──► screenshot (cover) ──► device shell ──► text
//!              │                                   │
//!        texture or fallback               artwork or placeholder
//! ```
//!
//! Drawing goes through the [`Surface`](surface::Surface) trait. The
//! [`PixmapSurface`](raster::PixmapSurface) rasterizes with tiny-skia; the
//! [`RecordingSurface`](surface::RecordingSurface) captures the draw calls
//! for inspection.

pub mod background;
pub mod compositor;
pub mod export;
pub mod loader;
pub mod raster;
pub mod session;
pub mod style;
pub mod surface;
pub mod text;

pub use compositor::render;
pub use loader::{AssetEvent, AssetLoader, AssetRequest};
pub use raster::{FontSet, PixmapSurface};
pub use session::ListingEditor;
pub use style::{PlaceholderStyle, RenderStyle};
pub use surface::{DrawOp, Fill, FontWeight, RecordingSurface, Surface, TextRun};
