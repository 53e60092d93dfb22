#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::{Point, Viewport};
use crate::doc::{Geometry, Shape};

/// Corner of a rectangle's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    /// Clockwise from the top-left, matching [`crate::coords::Bounds::corners`].
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    /// Whether this corner owns the box's minimum x.
    #[must_use]
    pub fn is_min_x(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether this corner owns the box's minimum y.
    #[must_use]
    pub fn is_min_y(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }
}

/// A draggable edit handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Rectangle corner.
    Corner(Corner),
    /// Polygon vertex by position.
    Vertex(usize),
    /// Circle radius handle, above the center.
    Radius,
}

/// Which part of the edit overlay was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPart {
    Handle(Handle),
    Mover,
}

/// Bounding-box containment of a relative point.
///
/// Polygons and circles are approximated by their axis-aligned boxes.
#[must_use]
pub fn contains(shape: &Shape, pt: Point, viewport: Viewport) -> bool {
    shape
        .geometry
        .bounds(viewport)
        .is_some_and(|b| b.contains_point(pt))
}

/// Relative positions of the edit handles for `geometry`.
#[must_use]
pub fn handle_positions(geometry: &Geometry, viewport: Viewport) -> Vec<(Handle, Point)> {
    match geometry {
        Geometry::Rectangle { .. } => {
            let Some(bounds) = geometry.bounds(viewport) else {
                return Vec::new();
            };
            Corner::ALL
                .iter()
                .zip(bounds.corners())
                .map(|(corner, pos)| (Handle::Corner(*corner), pos))
                .collect()
        }
        Geometry::Polygon { points } => points
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::Vertex(i), *p))
            .collect(),
        Geometry::Circle { center, radius } => {
            vec![(Handle::Radius, radius_handle_position(*center, radius.effective(viewport), viewport))]
        }
    }
}

/// Relative position of the circle radius handle: straight above the center.
#[must_use]
pub fn radius_handle_position(center: Point, radius_px: f64, viewport: Viewport) -> Point {
    if viewport.is_empty() {
        return center;
    }
    Point::new(center.x, center.y - radius_px / viewport.height)
}

/// Test `pt` (relative) against the handles first, then the mover box.
#[must_use]
pub fn hit_edit_part(geometry: &Geometry, pt: Point, viewport: Viewport, handle_radius_px: f64) -> Option<EditPart> {
    let pt_px = viewport.to_pixels(pt);
    let handle = handle_positions(geometry, viewport)
        .into_iter()
        .rev()
        .find(|(_, pos)| {
            let pos_px = viewport.to_pixels(*pos);
            (pos_px.x - pt_px.x).abs() <= handle_radius_px && (pos_px.y - pt_px.y).abs() <= handle_radius_px
        });
    if let Some((handle, _)) = handle {
        return Some(EditPart::Handle(handle));
    }
    geometry
        .bounds(viewport)
        .filter(|b| b.contains_point(pt))
        .map(|_| EditPart::Mover)
}
