//! Shotframe Layout
//!
//! Geometry behind the listing compositor:
//! - **Cover fit:** Source sub-rectangle that fills a destination without distortion
//! - **Solver:** Device frame placement and the screenshot destination
//! - **Text:** Title/subtitle sizes and baselines
//!
//! This crate is pure computation: no I/O and no pixels.
//! All inputs are data; all outputs are data.

pub mod cover;
pub mod solver;
pub mod text;

pub use cover::{compute_cover_sample, CoverSample};
pub use solver::{px_unit, solve, LayoutConfig, LayoutResult};
pub use text::{text_layout, TextConfig, TextLayout};
