//! Print the solved layout for one canvas size.

use std::path::PathBuf;

use serde::Serialize;
use shotframe_layout::{solve, text_layout, LayoutResult, TextLayout};
use shotframe_model::device;

use super::load_style;

#[derive(Serialize)]
struct LayoutReport<'a> {
    device: &'a str,
    width: u32,
    height: u32,
    layout: LayoutResult,
    text: TextLayout,
}

pub fn run(width: u32, height: u32, device_key: String, style: Option<PathBuf>) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        anyhow::bail!("Canvas size must be non-zero, got {width}x{height}");
    }
    let style = load_style(style.as_deref())?;
    let device = device::lookup(&device_key);
    if device.key != device_key {
        tracing::warn!(requested = %device_key, using = %device.key, "Unknown device");
    }

    let (w, h) = (width as f64, height as f64);
    let report = LayoutReport {
        device: &device.key,
        width,
        height,
        layout: solve(w, h, device, &style.layout),
        text: text_layout(w, h, &style.text),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
