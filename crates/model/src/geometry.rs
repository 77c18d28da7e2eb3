//! Rectangle and size types for layout.
//!
//! [`Rect`] is in target-surface pixels. [`NormRect`] is normalized to the
//! `[0.0, 1.0]` range of some enclosing box (a device frame, a canvas).

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A width/height pair in design or surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// A rectangle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(w: f64, h: f64) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The center point of this rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Sub-rectangle addressed by fractions of this rectangle.
    pub fn sub_rect(&self, frac: &NormRect) -> Rect {
        Rect {
            x: self.x + self.w * frac.x,
            y: self.y + self.h * frac.y,
            w: self.w * frac.w,
            h: self.h * frac.h,
        }
    }

    /// Express this rectangle as fractions of a `canvas_w` x `canvas_h` canvas.
    ///
    /// Unlike [`NormRect::new`] this does not validate: a rectangle hanging
    /// off the canvas yields components outside `[0, 1]`.
    pub fn to_fractions(&self, canvas_w: f64, canvas_h: f64) -> Rect {
        Rect {
            x: self.x / canvas_w,
            y: self.y / canvas_h,
            w: self.w / canvas_w,
            h: self.h / canvas_h,
        }
    }
}

/// A rectangle expressed as fractions of an enclosing box.
///
/// Invariant: every component is in `[0, 1]`, `x + w <= 1`, `y + h <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNormRect")]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Deserialize)]
struct RawNormRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl TryFrom<RawNormRect> for NormRect {
    type Error = ModelError;

    fn try_from(raw: RawNormRect) -> Result<Self, Self::Error> {
        NormRect::new(raw.x, raw.y, raw.w, raw.h)
    }
}

impl NormRect {
    /// Create a normalized rectangle, rejecting values outside the unit box.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self, ModelError> {
        // Sums of exact pixel fractions (e.g. 26/390 + 338/390) can land a
        // hair above 1.0.
        const EPS: f64 = 1e-9;
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !(in_unit(x) && in_unit(y) && in_unit(w) && in_unit(h))
            || x + w > 1.0 + EPS
            || y + h > 1.0 + EPS
        {
            return Err(ModelError::InvalidRect { x, y, w, h });
        }
        Ok(Self { x, y, w, h })
    }

    /// Build from a pixel rectangle inside a `box_w` x `box_h` box.
    pub fn from_pixels(
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        box_w: f64,
        box_h: f64,
    ) -> Result<Self, ModelError> {
        Self::new(x / box_w, y / box_h, w / box_w, h / box_h)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}
