//! Errors raised while constructing model values.

/// Errors that can occur when building or parsing model values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Rectangle ({x}, {y}, {w}, {h}) does not fit inside the unit box")]
    InvalidRect { x: f64, y: f64, w: f64, h: f64 },

    #[error("Invalid color '{input}': expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor { input: String },

    #[error("A texture background needs a solid or gradient fallback")]
    NestedTextureFallback,

    #[error("Invalid background '{input}': {reason}")]
    InvalidBackground { input: String, reason: String },

    #[error("Unknown preset: {id}")]
    UnknownPreset { id: String },

    #[error("Screenshot index {index} out of range (have {len})")]
    ScreenshotIndex { index: usize, len: usize },
}
