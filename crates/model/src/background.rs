//! Background fill specifications and the built-in palettes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::assets::AssetKey;
use crate::error::ModelError;

/// An 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(input: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidColor {
            input: input.to_string(),
        };
        let hex = input.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Ok(Color::rgba(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Color {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// How the canvas background is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundSpec {
    /// Flat color over the whole canvas.
    Solid { color: Color },

    /// Two-stop linear gradient; 0° runs along +x, 90° along +y.
    Gradient {
        from: Color,
        to: Color,
        angle_degrees: f64,
    },

    /// Photographic texture stretched over the canvas.
    Texture(TextureBackground),
}

/// A texture background with its guaranteed non-texture fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTextureBackground")]
pub struct TextureBackground {
    texture: AssetKey,
    fallback: Box<BackgroundSpec>,
}

#[derive(Deserialize)]
struct RawTextureBackground {
    texture: AssetKey,
    fallback: Box<BackgroundSpec>,
}

impl TryFrom<RawTextureBackground> for TextureBackground {
    type Error = ModelError;

    fn try_from(raw: RawTextureBackground) -> Result<Self, Self::Error> {
        TextureBackground::new(raw.texture, *raw.fallback)
    }
}

impl TextureBackground {
    /// Pair a texture with the fill used until (or instead of) the texture loads.
    pub fn new(texture: AssetKey, fallback: BackgroundSpec) -> Result<Self, ModelError> {
        if matches!(fallback, BackgroundSpec::Texture(_)) {
            return Err(ModelError::NestedTextureFallback);
        }
        Ok(Self {
            texture,
            fallback: Box::new(fallback),
        })
    }

    pub fn texture(&self) -> &AssetKey {
        &self.texture
    }

    pub fn fallback(&self) -> &BackgroundSpec {
        &self.fallback
    }
}

impl BackgroundSpec {
    pub fn solid(color: Color) -> Self {
        BackgroundSpec::Solid { color }
    }

    pub fn gradient(from: Color, to: Color, angle_degrees: f64) -> Self {
        BackgroundSpec::Gradient {
            from,
            to,
            angle_degrees,
        }
    }

    /// Texture asset this background depends on, if any.
    pub fn texture_key(&self) -> Option<&AssetKey> {
        match self {
            BackgroundSpec::Texture(t) => Some(t.texture()),
            _ => None,
        }
    }
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        BackgroundSpec::solid(Color::WHITE)
    }
}

/// Number of entries in the texture palette.
pub const PALETTE_LEN: usize = 6;

/// Path of a palette texture, relative to the assets directory.
pub fn texture_asset_path(index: usize) -> PathBuf {
    PathBuf::from("backgrounds").join(format!("bg-{index}.jpg"))
}

fn palette_fallback(index: usize) -> BackgroundSpec {
    let hex = |s: &str| Color::from_hex(s).unwrap_or(Color::WHITE);
    match index {
        0 => BackgroundSpec::gradient(hex("#f8f9fa"), hex("#e9ecef"), 135.0),
        1 => BackgroundSpec::gradient(hex("#e3f2fd"), hex("#bbdefb"), 180.0),
        2 => BackgroundSpec::gradient(hex("#fce4ec"), hex("#f8bbd9"), 90.0),
        3 => BackgroundSpec::solid(hex("#f5f5f5")),
        4 => BackgroundSpec::solid(hex("#fafafa")),
        _ => BackgroundSpec::gradient(hex("#e8f5e9"), hex("#c8e6c9"), 0.0),
    }
}

/// The texture palette. Built once, never mutated.
pub fn palette() -> &'static [BackgroundSpec] {
    static PALETTE: OnceLock<Vec<BackgroundSpec>> = OnceLock::new();
    PALETTE.get_or_init(|| {
        (0..PALETTE_LEN)
            .map(|i| {
                let fallback = palette_fallback(i);
                match TextureBackground::new(AssetKey::Texture(i), fallback.clone()) {
                    Ok(texture) => BackgroundSpec::Texture(texture),
                    Err(_) => fallback,
                }
            })
            .collect()
    })
}

/// Palette entry at `index`, clamped to the last entry.
pub fn palette_entry(index: usize) -> &'static BackgroundSpec {
    let palette = palette();
    &palette[index.min(palette.len() - 1)]
}

/// Named solid/gradient presets.
pub fn named_preset(name: &str) -> Option<BackgroundSpec> {
    let hex = |s: &str| Color::from_hex(s).unwrap_or(Color::WHITE);
    let spec = match name {
        "white" => BackgroundSpec::solid(hex("#ffffff")),
        "blue" => BackgroundSpec::solid(hex("#e3f2fd")),
        "red" => BackgroundSpec::solid(hex("#ffebee")),
        "dark" => BackgroundSpec::solid(hex("#1a1a1a")),
        "gradient1" => BackgroundSpec::gradient(hex("#667eea"), hex("#764ba2"), 135.0),
        "gradient2" => BackgroundSpec::gradient(hex("#f093fb"), hex("#f5576c"), 90.0),
        "gradient3" => BackgroundSpec::gradient(hex("#4facfe"), hex("#00f2fe"), 180.0),
        _ => return None,
    };
    Some(spec)
}

pub const NAMED_PRESETS: [&str; 7] = [
    "white",
    "blue",
    "red",
    "dark",
    "gradient1",
    "gradient2",
    "gradient3",
];

/// Parses `solid:#hex`, `gradient:#from:#to[:angle]`, `preset:<n>` or a preset name.
impl FromStr for BackgroundSpec {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ModelError::InvalidBackground {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["solid", color] => Ok(BackgroundSpec::solid(color.parse()?)),
            ["gradient", from, to] => Ok(BackgroundSpec::gradient(from.parse()?, to.parse()?, 0.0)),
            ["gradient", from, to, angle] => {
                let angle: f64 = angle
                    .parse()
                    .map_err(|_| invalid("angle must be a number of degrees"))?;
                Ok(BackgroundSpec::gradient(from.parse()?, to.parse()?, angle))
            }
            ["preset", index] => {
                let index: usize = index
                    .parse()
                    .map_err(|_| invalid("preset index must be an integer"))?;
                if index >= PALETTE_LEN {
                    return Err(invalid("preset index out of range"));
                }
                Ok(palette_entry(index).clone())
            }
            [name] => named_preset(name).ok_or_else(|| invalid("unknown preset name")),
            _ => Err(invalid("unrecognized background form")),
        }
    }
}
