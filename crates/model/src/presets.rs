//! Output size tables: batch export sizes and app-store image presets.

use serde::Serialize;

use crate::device::Platform;
use crate::error::ModelError;

/// One size produced by batch export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportSize {
    /// Short key used in filenames.
    pub key: &'static str,
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Sizes produced by a batch export, in order.
pub const BATCH_EXPORT_SIZES: [ExportSize; 2] = [
    ExportSize {
        key: "6.7",
        name: "6.7 inch",
        width: 1290,
        height: 2796,
    },
    ExportSize {
        key: "5.5",
        name: "5.5 inch",
        width: 1242,
        height: 2208,
    },
];

/// An app-store image size requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub platform: Platform,
    pub purpose: &'static str,
}

const fn preset(
    id: &'static str,
    name: &'static str,
    width: u32,
    height: u32,
    platform: Platform,
    purpose: &'static str,
) -> StorePreset {
    StorePreset {
        id,
        name,
        width,
        height,
        platform,
        purpose,
    }
}

pub const STORE_PRESETS: [StorePreset; 12] = [
    preset("ios-icon", "iOS icon", 1024, 1024, Platform::Apple, "App Store icon"),
    preset("android-icon", "Android icon", 512, 512, Platform::Android, "Play Store icon"),
    preset("play-feature", "Feature graphic", 1024, 500, Platform::Android, "Play Store banner"),
    preset("iphone-se", "iPhone SE", 750, 1334, Platform::Apple, "screenshot"),
    preset("iphone-12", "iPhone 12/13/14", 1170, 2532, Platform::Apple, "screenshot"),
    preset("iphone-15-pro", "iPhone 15/16 Pro", 1290, 2796, Platform::Apple, "screenshot"),
    preset("ipad-pro", "iPad Pro 12.9\"", 2048, 2732, Platform::Apple, "screenshot"),
    preset("ipad-10", "iPad 10", 1640, 2360, Platform::Apple, "screenshot"),
    preset("android-phone", "Android phone", 1080, 1920, Platform::Android, "portrait screenshot"),
    preset("android-phone-h", "Android landscape", 1920, 1080, Platform::Android, "landscape screenshot"),
    preset("android-7", "7\" tablet", 1200, 1920, Platform::Android, "screenshot"),
    preset("android-10", "10\" tablet", 1600, 2560, Platform::Android, "screenshot"),
];

/// Look up a store preset by id.
pub fn store_preset(id: &str) -> Result<&'static StorePreset, ModelError> {
    STORE_PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ModelError::UnknownPreset { id: id.to_string() })
}

/// Store presets for one platform, in table order.
pub fn store_presets_for(platform: Platform) -> Vec<&'static StorePreset> {
    STORE_PRESETS
        .iter()
        .filter(|p| p.platform == platform)
        .collect()
}
