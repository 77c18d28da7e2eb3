//! Device profile registry.
//!
//! Each profile describes a mockup shell: its artwork size in design pixels,
//! where the visible screen sits inside it, and the aspect ratio of the
//! content that screen shows. The registry is a static table built once;
//! there is no mutation API.

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::assets::AssetKey;
use crate::geometry::{NormRect, Size};

/// Store platform a device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Apple,
    Android,
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apple" | "ios" => Ok(Platform::Apple),
            "android" => Ok(Platform::Android),
            other => Err(format!("Unknown platform: {other}. Use: apple, android")),
        }
    }
}

/// Shell artwork paths, relative to the assets directory, in load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellAsset {
    /// Raster form, tried first.
    pub raster: PathBuf,
    /// Vector form, tried when the raster form fails to load.
    pub vector: PathBuf,
}

/// Geometry of one mockup device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Registry key (`iphone`, `ipad`, `android`).
    pub key: String,

    /// Human-readable name.
    pub name: String,

    pub platform: Platform,

    /// Logical size of the shell artwork.
    pub frame_size: Size,

    /// Visible screen as fractions of the frame.
    pub screen_rect: NormRect,

    /// Width over height of the content shown on the screen.
    pub screen_ratio: f64,

    pub shell: ShellAsset,
}

impl DeviceProfile {
    /// Asset key of this device's shell image.
    pub fn shell_key(&self) -> AssetKey {
        AssetKey::shell(self.key.clone())
    }
}

/// Key of the profile returned for unknown lookups.
pub const DEFAULT_DEVICE: &str = "iphone";

struct DeviceDef {
    key: &'static str,
    name: &'static str,
    platform: Platform,
    frame: (f64, f64),
    screen_px: (f64, f64, f64, f64),
    content: (f64, f64),
    artwork: &'static str,
}

const DEVICE_DEFS: [DeviceDef; 3] = [
    DeviceDef {
        key: "iphone",
        name: "iPhone",
        platform: Platform::Apple,
        frame: (390.0, 844.0),
        screen_px: (26.0, 58.0, 338.0, 732.0),
        content: (1170.0, 2532.0),
        artwork: "mockup-iphone15",
    },
    DeviceDef {
        key: "ipad",
        name: "iPad",
        platform: Platform::Apple,
        frame: (768.0, 1024.0),
        screen_px: (48.0, 52.0, 672.0, 920.0),
        content: (2048.0, 2732.0),
        artwork: "mockup-ipad",
    },
    DeviceDef {
        key: "android",
        name: "Android",
        platform: Platform::Android,
        frame: (360.0, 800.0),
        screen_px: (28.0, 52.0, 304.0, 696.0),
        content: (1080.0, 2400.0),
        artwork: "mockup-android",
    },
];

fn build(def: &DeviceDef) -> Option<DeviceProfile> {
    let (fw, fh) = def.frame;
    let (x, y, w, h) = def.screen_px;
    let screen_rect = NormRect::from_pixels(x, y, w, h, fw, fh).ok()?;
    let mockups = PathBuf::from("mockups");
    Some(DeviceProfile {
        key: def.key.to_string(),
        name: def.name.to_string(),
        platform: def.platform,
        frame_size: Size::new(fw, fh),
        screen_rect,
        screen_ratio: def.content.0 / def.content.1,
        shell: ShellAsset {
            raster: mockups.join(format!("{}.png", def.artwork)),
            vector: mockups.join(format!("{}.svg", def.artwork)),
        },
    })
}

/// All registered profiles, in display order.
pub fn all() -> &'static [DeviceProfile] {
    static REGISTRY: OnceLock<Vec<DeviceProfile>> = OnceLock::new();
    REGISTRY.get_or_init(|| DEVICE_DEFS.iter().filter_map(build).collect())
}

/// Profile for `key`, or the default profile for unknown keys.
pub fn lookup(key: &str) -> &'static DeviceProfile {
    let registry = all();
    registry
        .iter()
        .find(|p| p.key == key)
        .or_else(|| registry.iter().find(|p| p.key == DEFAULT_DEVICE))
        .unwrap_or(&registry[0])
}

/// Profiles offered for a platform.
pub fn devices_for(platform: Platform) -> Vec<&'static DeviceProfile> {
    all().iter().filter(|p| p.platform == platform).collect()
}

/// Pick the device for a platform/device selection pair.
///
/// Android has a single profile; Apple offers `ipad` and defaults to `iphone`.
pub fn resolve(platform: Platform, device_key: &str) -> &'static DeviceProfile {
    match platform {
        Platform::Android => lookup("android"),
        Platform::Apple if device_key == "ipad" => lookup("ipad"),
        Platform::Apple => lookup("iphone"),
    }
}
