//! Per-pass render state.

use crate::background::BackgroundSpec;
use crate::device::DeviceProfile;
use crate::screenshot::Screenshot;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 30;

/// Maximum subtitle length, in characters.
pub const SUBTITLE_MAX_CHARS: usize = 50;

/// Everything one render pass reads, borrowed from the owning session.
///
/// Built fresh for every pass and never retained by the compositor, so a
/// pass always sees the selections as they are at draw time.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub background: &'a BackgroundSpec,
    pub device: &'a DeviceProfile,
    pub screenshot: Option<&'a Screenshot>,
}

/// Trim surrounding whitespace and cap `input` at `max` characters.
pub fn clamp_text(input: &str, max: usize) -> String {
    input.trim().chars().take(max).collect()
}
