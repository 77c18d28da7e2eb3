//! tiny-skia raster surface.

use std::fmt;
use std::path::Path;
use std::sync::Once;

use ab_glyph::{point, Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use shotframe_common::config::FontConfig;
use shotframe_common::{ShotframeError, ShotframeResult};
use resvg::usvg::fontdb;
use shotframe_model::{Color, Rect};
use tiny_skia::{
    ColorU8, FilterQuality, GradientStop, IntRect, LinearGradient, Mask, Paint, PathBuilder,
    Pattern, Pixmap, Point, SpreadMode, Stroke, Transform,
};

use crate::surface::{Fill, FontWeight, Surface, TextRun};

static MISSING_FONT: Once = Once::new();

/// Families tried after the generic sans-serif one when picking a host font.
const SANS_FAMILIES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

/// Regular and bold faces used for text runs.
///
/// Bold runs fall back to the regular face when no bold face is configured.
#[derive(Clone, Default)]
pub struct FontSet {
    regular: Option<FontArc>,
    bold: Option<FontArc>,
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl FontSet {
    pub fn new(regular: Option<FontArc>, bold: Option<FontArc>) -> Self {
        Self { regular, bold }
    }

    /// Load the faces named in `config`. Unreadable files are skipped with
    /// a warning, and any weight still missing comes from the host's
    /// sans-serif fonts.
    pub fn load(config: &FontConfig) -> Self {
        let mut set = Self {
            regular: config.regular.as_deref().and_then(load_font),
            bold: config.bold.as_deref().and_then(load_font),
        };
        if set.regular.is_none() || set.bold.is_none() {
            let system = Self::system();
            set.regular = set.regular.or(system.regular);
            set.bold = set.bold.or(system.bold);
        }
        set
    }

    /// Regular and bold sans-serif faces from the installed system fonts.
    ///
    /// Empty when the host has no usable sans-serif face.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let set = Self {
            regular: system_face(&db, fontdb::Weight::NORMAL),
            bold: system_face(&db, fontdb::Weight::BOLD),
        };
        if set.is_empty() {
            tracing::warn!(faces = db.len(), "No sans-serif system font found");
        } else {
            tracing::debug!(faces = db.len(), "Using system sans-serif fonts");
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }

    fn face(&self, weight: FontWeight) -> Option<&FontArc> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
        }
    }
}

fn load_font(path: &Path) -> Option<FontArc> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read font");
            return None;
        }
    };
    match FontArc::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse font");
            None
        }
    }
}

fn system_face(db: &fontdb::Database, weight: fontdb::Weight) -> Option<FontArc> {
    let mut families = vec![fontdb::Family::SansSerif];
    families.extend(SANS_FAMILIES.iter().map(|&name| fontdb::Family::Name(name)));
    let query = fontdb::Query {
        families: &families,
        weight,
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    let parsed = db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
    })?;
    match parsed {
        Ok(font) => Some(FontArc::from(font)),
        Err(e) => {
            tracing::warn!(error = %e, weight = weight.0, "Failed to parse system font");
            None
        }
    }
}

/// Pixel surface backed by a premultiplied tiny-skia pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    fonts: FontSet,
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("fonts", &self.fonts)
            .finish()
    }
}

fn allocate(width: u32, height: u32) -> ShotframeResult<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| ShotframeError::render(format!("Cannot allocate {width}x{height} surface")))
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Convert straight-alpha image data into a premultiplied pixmap.
fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32, fonts: FontSet) -> ShotframeResult<Self> {
        Ok(Self {
            pixmap: allocate(width, height)?,
            fonts,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Straight-alpha copy of the current pixels.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, self.pixmap.height(), |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    /// Straight-alpha color of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    fn text_mask(&self, font: &FontArc, run: &TextRun) -> Option<Mask> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut mask = Mask::new(width, height)?;

        // Canvas font sizes are em sizes; ab_glyph scales by ascent - descent.
        let em = run.font_size as f32;
        let scale = font
            .units_per_em()
            .map(|upem| PxScale::from(em * font.height_unscaled() / upem))
            .unwrap_or_else(|| PxScale::from(em));
        let scaled = font.as_scaled(scale);

        let mut glyphs = Vec::with_capacity(run.text.len());
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in run.text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        let origin_x = run.center_x as f32 - caret / 2.0;
        let baseline = run.baseline as f32;
        let data = mask.data_mut();
        for (id, offset) in glyphs {
            let glyph = id.with_scale_and_position(scale, point(origin_x + offset, baseline));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i64 + px as i64;
                let y = bounds.min.y as i64 + py as i64;
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    return;
                }
                let idx = (y as u32 * width + x as u32) as usize;
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                data[idx] = data[idx].saturating_add(value);
            });
        }
        Some(mask)
    }
}

impl Surface for PixmapSurface {
    fn reset(&mut self, width: u32, height: u32) -> ShotframeResult<()> {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        } else {
            self.pixmap = allocate(width, height)?;
        }
        Ok(())
    }

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        let Some(area) = skia_rect(rect) else {
            return;
        };
        let paint = match fill {
            Fill::Solid { color } => solid_paint(*color),
            Fill::LinearGradient {
                start,
                end,
                from,
                to,
            } => {
                let shader = LinearGradient::new(
                    Point::from_xy(start.0 as f32, start.1 as f32),
                    Point::from_xy(end.0 as f32, end.1 as f32),
                    vec![
                        GradientStop::new(0.0, skia_color(*from)),
                        GradientStop::new(1.0, skia_color(*to)),
                    ],
                    SpreadMode::Pad,
                    Transform::identity(),
                );
                match shader {
                    Some(shader) => {
                        let mut paint = Paint::default();
                        paint.shader = shader;
                        paint.anti_alias = true;
                        paint
                    }
                    // Degenerate axis: tiny-skia refuses it, the end color wins.
                    None => solid_paint(*to),
                }
            }
        };
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }

    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        if src.w <= 0.0 || src.h <= 0.0 {
            return;
        }
        // Sample only the texels under `src` so nothing outside the crop
        // bleeds into the destination edges.
        let left = src.x.floor().max(0.0);
        let top = src.y.floor().max(0.0);
        let right = src.right().ceil().min(image.width() as f64);
        let bottom = src.bottom().ceil().min(image.height() as f64);
        let Some(crop) = IntRect::from_ltrb(left as i32, top as i32, right as i32, bottom as i32)
        else {
            return;
        };
        let (Some(source), Some(area)) = (
            to_pixmap(image).and_then(|full| full.clone_rect(crop)),
            skia_rect(dst),
        ) else {
            return;
        };

        let scale_x = dst.w / src.w;
        let scale_y = dst.h / src.h;
        let transform = Transform::from_row(
            scale_x as f32,
            0.0,
            0.0,
            scale_y as f32,
            (dst.x - (src.x - left) * scale_x) as f32,
            (dst.y - (src.y - top) * scale_y) as f32,
        );

        let mut paint = Paint::default();
        paint.shader = Pattern::new(
            source.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bicubic,
            1.0,
            transform,
        );
        paint.anti_alias = true;
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }

    fn stroke_round_rect(&mut self, rect: Rect, radius: f64, line_width: f64, color: Color) {
        let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0) as f32;
        let (x, y) = (rect.x as f32, rect.y as f32);
        let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);

        let mut pb = PathBuilder::new();
        pb.move_to(x + r, y);
        pb.line_to(right - r, y);
        pb.quad_to(right, y, right, y + r);
        pb.line_to(right, bottom - r);
        pb.quad_to(right, bottom, right - r, bottom);
        pb.line_to(x + r, bottom);
        pb.quad_to(x, bottom, x, bottom - r);
        pb.line_to(x, y + r);
        pb.quad_to(x, y, x + r, y);
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: line_width as f32,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill_text(&mut self, run: &TextRun) {
        if run.text.is_empty() {
            return;
        }
        let Some(font) = self.fonts.face(run.weight).cloned() else {
            MISSING_FONT.call_once(|| {
                tracing::warn!("No font available; text layer is not rasterized");
            });
            return;
        };
        let Some(mask) = self.text_mask(&font, run) else {
            return;
        };
        let Some(area) = skia_rect(Rect::from_size(self.width() as f64, self.height() as f64))
        else {
            return;
        };
        self.pixmap
            .fill_rect(area, &solid_paint(run.color), Transform::identity(), Some(&mask));
    }
}
