//! Drawing session: turns a pointer gesture into one new shape.
//!
//! Rectangles and circles are dragged out between pointer-down and
//! pointer-up. Polygons are clicked vertex by vertex: every release fixes the
//! live vertex, the next move starts a new one, and a double-click finishes.
//! Commits that would produce a degenerate shape are refused and the session
//! keeps waiting for input.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::coords::{Point, Radius, Viewport};
use crate::doc::{Geometry, Shape, ShapeKind};
use crate::input::DrawOptions;

/// Outcome of feeding one event to a [`DrawSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawStep {
    /// Nothing changed.
    Ignored,
    /// The draft changed; repaint the preview.
    Preview,
    /// The draft is complete.
    Commit(Shape),
}

#[derive(Debug, Clone)]
pub struct DrawSession {
    options: DrawOptions,
    points: Vec<Point>,
    radius: Radius,
    /// Polygon only: the next move appends a vertex instead of moving the last one.
    append_next: bool,
}

impl DrawSession {
    #[must_use]
    pub fn new(options: DrawOptions) -> Self {
        Self { options, points: Vec::new(), radius: Radius::default(), append_next: false }
    }

    #[must_use]
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// Whether the first point has been placed.
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.points.is_empty()
    }

    /// The in-progress geometry, or `None` while there is nothing to show.
    #[must_use]
    pub fn draft(&self) -> Option<Geometry> {
        match self.options.kind {
            ShapeKind::Rectangle => match self.points.as_slice() {
                [a, b] => Some(Geometry::Rectangle { points: [*a, *b] }),
                _ => None,
            },
            ShapeKind::Polygon if self.points.len() >= 2 => Some(Geometry::Polygon { points: self.points.clone() }),
            ShapeKind::Polygon => None,
            ShapeKind::Circle => self.points.first().map(|c| Geometry::Circle { center: *c, radius: self.radius }),
        }
    }

    /// Place the first point. Later presses are ignored.
    pub fn pointer_down(&mut self, pt: Point) -> DrawStep {
        if self.is_started() {
            return DrawStep::Ignored;
        }
        self.points.push(pt);
        self.append_next = true;
        DrawStep::Preview
    }

    pub fn pointer_move(&mut self, pt: Point, viewport: Viewport) -> DrawStep {
        if !self.is_started() {
            return DrawStep::Ignored;
        }
        match self.options.kind {
            ShapeKind::Rectangle => self.set_second_point(pt),
            ShapeKind::Polygon => {
                if self.append_next {
                    self.points.push(pt);
                    self.append_next = false;
                } else if let Some(last) = self.points.last_mut() {
                    *last = pt;
                }
            }
            ShapeKind::Circle => {
                if !self.try_radius(pt, viewport) {
                    return DrawStep::Ignored;
                }
            }
        }
        DrawStep::Preview
    }

    /// Finish a rectangle or circle, or fix the live polygon vertex.
    pub fn pointer_up(&mut self, pt: Point, viewport: Viewport) -> DrawStep {
        if !self.is_started() {
            return DrawStep::Ignored;
        }
        match self.options.kind {
            ShapeKind::Rectangle => {
                self.set_second_point(pt);
                self.commit_if_valid()
            }
            ShapeKind::Circle => {
                self.try_radius(pt, viewport);
                self.commit_if_valid()
            }
            ShapeKind::Polygon => {
                if !self.append_next
                    && self.points.len() > 1
                    && let Some(last) = self.points.last_mut()
                {
                    *last = pt;
                }
                self.append_next = true;
                DrawStep::Preview
            }
        }
    }

    /// Finish a polygon. A trailing duplicate vertex is dropped first.
    pub fn double_click(&mut self) -> DrawStep {
        if self.options.kind != ShapeKind::Polygon {
            return DrawStep::Ignored;
        }
        if let [.., a, b] = self.points.as_slice()
            && a == b
        {
            self.points.pop();
        }
        self.commit_if_valid()
    }

    fn set_second_point(&mut self, pt: Point) {
        self.points.truncate(1);
        self.points.push(pt);
    }

    /// Accept the radius reaching `pt` only if the circle stays on the surface.
    fn try_radius(&mut self, pt: Point, viewport: Viewport) -> bool {
        let Some(center) = self.points.first().copied() else {
            return false;
        };
        let candidate = Radius::between(center, pt);
        if !viewport.fits_circle(center, candidate.effective(viewport)) {
            return false;
        }
        self.radius = candidate;
        true
    }

    #[allow(clippy::float_cmp)]
    fn is_committable(&self) -> bool {
        match self.options.kind {
            ShapeKind::Rectangle => match self.points.as_slice() {
                [a, b] => a.x != b.x && a.y != b.y,
                _ => false,
            },
            ShapeKind::Polygon => self.points.len() >= 3,
            ShapeKind::Circle => self.is_started() && !self.radius.is_zero(),
        }
    }

    fn commit_if_valid(&self) -> DrawStep {
        if !self.is_committable() {
            return DrawStep::Ignored;
        }
        match self.draft() {
            Some(geometry) => DrawStep::Commit(
                Shape::new(geometry).with_style(self.options.line_color.clone(), self.options.line_width),
            ),
            None => DrawStep::Ignored,
        }
    }
}
