//! Coordinate spaces: surface-relative points, pixel points, and bounding boxes.
//!
//! Stored geometry always lives in relative space, where `(0, 0)` is the
//! surface's top-left corner and `(1, 1)` its bottom-right. Pixels only exist
//! at paint and hit-test time, derived from the current [`Viewport`]. This is
//! what lets a surface resize without touching a single stored coordinate.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

/// A point in relative or pixel space, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into the closed unit range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(0.0, 1.0), y: self.y.clamp(0.0, 1.0) }
    }

    /// Component-wise `self + other`.
    #[must_use]
    pub fn offset_by(self, other: Point) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Anisotropic circle radius, expressed as fractions of surface width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Radius {
    pub x: f64,
    pub y: f64,
}

impl Radius {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Radius spanning from `center` to `edge`, both relative.
    #[must_use]
    pub fn between(center: Point, edge: Point) -> Self {
        Self { x: (edge.x - center.x).abs(), y: (edge.y - center.y).abs() }
    }

    /// Absolute radius in pixels: the Euclidean norm of both scaled components.
    ///
    /// Because each component scales with a different surface axis, a circle
    /// drawn on one aspect ratio keeps its relative extents, not its roundness,
    /// when the surface changes shape.
    #[must_use]
    pub fn effective(&self, viewport: Viewport) -> f64 {
        (self.x * viewport.width).hypot(self.y * viewport.height)
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Axis-aligned bounding box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Box spanned by two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty input.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    /// Box of half-extents `(rx, ry)` around `center`.
    #[must_use]
    pub fn around(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            min: Point::new(center.x - rx, center.y - ry),
            max: Point::new(center.x + rx, center.y + ry),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether `inner` lies entirely within this box (edges may touch).
    #[must_use]
    pub fn contains(&self, inner: &Bounds) -> bool {
        inner.min.x >= self.min.x
            && inner.min.y >= self.min.y
            && inner.max.x <= self.max.x
            && inner.max.y <= self.max.y
    }

    /// Corners clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

/// Pixel dimensions of a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A surface with no area cannot map pixels back to relative space.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert a relative point to pixels.
    #[must_use]
    pub fn to_pixels(&self, rel: Point) -> Point {
        Point::new(rel.x * self.width, rel.y * self.height)
    }

    /// Convert a pixel point to relative space without clamping.
    ///
    /// An empty viewport maps everything to the origin.
    #[must_use]
    pub fn to_relative_unclamped(&self, px: Point) -> Point {
        if self.is_empty() {
            return Point::default();
        }
        Point::new(px.x / self.width, px.y / self.height)
    }

    /// Convert a pixel point to relative space, clamped into `[0, 1]`.
    #[must_use]
    pub fn to_relative(&self, px: Point) -> Point {
        self.to_relative_unclamped(px).clamped()
    }

    /// Whether a circle of `radius_px` around relative `center` fits on the surface.
    #[must_use]
    pub fn fits_circle(&self, center: Point, radius_px: f64) -> bool {
        let c = self.to_pixels(center);
        c.x - radius_px >= 0.0
            && c.x + radius_px <= self.width
            && c.y - radius_px >= 0.0
            && c.y + radius_px <= self.height
    }
}
