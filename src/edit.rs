//! Edit session: drag handles and the mover to reshape one existing shape.
//!
//! Drags are position based. On grab the session remembers the offset
//! between the pointer and the grabbed part; every move places that part at
//! `pointer + offset` and then applies the guards for the shape type:
//!
//! - rectangle corners never cross the opposite corner and stay in `[0, 1]`;
//! - polygon vertices are clamped into `[0, 1]`;
//! - the circle radius only changes while the circle fits on the surface;
//! - the mover keeps the whole bounding box on the surface.
//!
//! The session holds its target by [`ShapeId`]; the engine resolves the
//! current index and hands in the geometry for every event.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use crate::consts::{CURSOR_DEFAULT, CURSOR_GRAB, CURSOR_MOVE};
use crate::coords::{Bounds, Point, Radius, Viewport};
use crate::doc::{Geometry, ShapeId};
use crate::hit::{self, Corner, EditPart, Handle};
use crate::render::EditOverlay;

/// Outcome of feeding one event to an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    /// Nothing happened.
    Ignored,
    /// A handle or the mover was grabbed.
    Grabbed(EditPart),
    /// The geometry was changed in place.
    Changed,
    /// The drag ended.
    Released,
    /// The user clicked away from the shape; editing is over.
    Finished,
}

/// Drag in progress. Offsets are `grabbed part - pointer`, relative.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Corner { corner: Corner, x_slot: usize, y_slot: usize, offset: Point },
    Vertex { index: usize, offset: Point },
    /// `origin` is the pointer at grab time and `grabbed` the radius it found.
    Radius { offset: Point, origin: Point, grabbed: Radius },
    Mover { offset: Point },
}

#[derive(Debug, Clone)]
pub struct EditSession {
    target: ShapeId,
    drag: Option<Drag>,
    /// Set when a drag changed the shape, so the click that ends it is swallowed.
    moved: bool,
    suppress_click: bool,
    /// Distance between the pointer-driven radius handle and its last legal position.
    blind: Point,
}

impl EditSession {
    #[must_use]
    pub fn new(target: ShapeId) -> Self {
        Self { target, drag: None, moved: false, suppress_click: false, blind: Point::default() }
    }

    #[must_use]
    pub fn target(&self) -> ShapeId {
        self.target
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// How far the pointer has run ahead of a radius handle held back by the surface edge.
    #[must_use]
    pub fn blind(&self) -> Point {
        self.blind
    }

    /// Grab whatever part of the overlay is under `pt`.
    pub fn pointer_down(
        &mut self,
        geometry: &Geometry,
        pt: Point,
        viewport: Viewport,
        handle_radius_px: f64,
    ) -> EditStep {
        let Some(part) = hit::hit_edit_part(geometry, pt, viewport, handle_radius_px) else {
            return EditStep::Ignored;
        };
        let drag = match part {
            EditPart::Mover => geometry
                .bounds(viewport)
                .map(|b| Drag::Mover { offset: b.min.delta_from(pt) }),
            EditPart::Handle(handle) => hit::handle_positions(geometry, viewport)
                .into_iter()
                .find(|(h, _)| *h == handle)
                .and_then(|(_, pos)| grab_handle(geometry, handle, pt, pos.delta_from(pt))),
        };
        let Some(drag) = drag else {
            return EditStep::Ignored;
        };
        self.drag = Some(drag);
        self.moved = false;
        self.blind = Point::default();
        EditStep::Grabbed(part)
    }

    /// Drag the grabbed part to follow `pt`, mutating `geometry` in place.
    pub fn pointer_move(&mut self, geometry: &mut Geometry, pt: Point, viewport: Viewport) -> EditStep {
        let Some(drag) = self.drag else {
            return EditStep::Ignored;
        };
        let before = geometry.clone();
        match drag {
            Drag::Corner { corner, x_slot, y_slot, offset } => {
                drag_corner(geometry, corner, x_slot, y_slot, pt.offset_by(offset).clamped());
            }
            Drag::Vertex { index, offset } => {
                if let Geometry::Polygon { points } = geometry
                    && let Some(p) = points.get_mut(index)
                {
                    *p = pt.offset_by(offset).clamped();
                }
            }
            Drag::Radius { offset, origin, grabbed } => {
                if pt == origin {
                    // Unmoved: keep the grabbed radius rather than re-deriving it from the handle.
                    self.restore_radius(geometry, grabbed);
                } else {
                    self.drag_radius(geometry, pt.offset_by(offset), viewport);
                }
            }
            Drag::Mover { offset } => drag_mover(geometry, pt.offset_by(offset), viewport),
        }
        if *geometry == before {
            return EditStep::Ignored;
        }
        self.moved = true;
        EditStep::Changed
    }

    pub fn pointer_up(&mut self) -> EditStep {
        if self.drag.take().is_none() {
            return EditStep::Ignored;
        }
        self.suppress_click = self.moved;
        self.moved = false;
        EditStep::Released
    }

    /// A click outside every handle and the mover finishes the session.
    ///
    /// The click that trails a drag is swallowed, even if the pointer ended
    /// up away from the shape.
    pub fn click(&mut self, geometry: &Geometry, pt: Point, viewport: Viewport, handle_radius_px: f64) -> EditStep {
        if std::mem::take(&mut self.suppress_click) {
            return EditStep::Ignored;
        }
        match hit::hit_edit_part(geometry, pt, viewport, handle_radius_px) {
            Some(_) => EditStep::Ignored,
            None => EditStep::Finished,
        }
    }

    fn restore_radius(&mut self, geometry: &mut Geometry, grabbed: Radius) {
        if let Geometry::Circle { radius, .. } = geometry {
            *radius = grabbed;
            self.blind = Point::default();
        }
    }

    fn drag_radius(&mut self, geometry: &mut Geometry, target: Point, viewport: Viewport) {
        let Geometry::Circle { center, radius } = geometry else {
            return;
        };
        let candidate = Radius::between(*center, target);
        if viewport.fits_circle(*center, candidate.effective(viewport)) {
            *radius = candidate;
            self.blind = Point::default();
        } else {
            let legal = hit::radius_handle_position(*center, radius.effective(viewport), viewport);
            self.blind = target.delta_from(legal);
        }
    }
}

/// Pointer cursor for hovering `pt` over the edit overlay.
#[must_use]
pub fn cursor_at(geometry: &Geometry, pt: Point, viewport: Viewport, handle_radius_px: f64) -> &'static str {
    match hit::hit_edit_part(geometry, pt, viewport, handle_radius_px) {
        Some(EditPart::Handle(_)) => CURSOR_GRAB,
        Some(EditPart::Mover) => CURSOR_MOVE,
        None => CURSOR_DEFAULT,
    }
}

/// The pixel-space overlay for `geometry`: mover box plus handle centers.
#[must_use]
pub fn overlay(geometry: &Geometry, viewport: Viewport) -> Option<EditOverlay> {
    let bounds = geometry.bounds(viewport)?;
    let mover = Bounds::from_corners(viewport.to_pixels(bounds.min), viewport.to_pixels(bounds.max));
    let handles = hit::handle_positions(geometry, viewport)
        .into_iter()
        .map(|(_, pos)| viewport.to_pixels(pos))
        .collect();
    Some(EditOverlay { mover, handles })
}

// =============================================================
// Drags
// =============================================================

fn grab_handle(geometry: &Geometry, handle: Handle, pointer: Point, offset: Point) -> Option<Drag> {
    match (geometry, handle) {
        (Geometry::Rectangle { points }, Handle::Corner(corner)) => {
            let [a, b] = points;
            let min_x_slot = usize::from(a.x > b.x);
            let min_y_slot = usize::from(a.y > b.y);
            let x_slot = if corner.is_min_x() { min_x_slot } else { 1 - min_x_slot };
            let y_slot = if corner.is_min_y() { min_y_slot } else { 1 - min_y_slot };
            Some(Drag::Corner { corner, x_slot, y_slot, offset })
        }
        (Geometry::Polygon { points }, Handle::Vertex(index)) if index < points.len() => {
            Some(Drag::Vertex { index, offset })
        }
        (Geometry::Circle { radius, .. }, Handle::Radius) => {
            Some(Drag::Radius { offset, origin: pointer, grabbed: *radius })
        }
        _ => None,
    }
}

/// Move one rectangle corner, keeping each axis where it would cross the opposite corner.
fn drag_corner(geometry: &mut Geometry, corner: Corner, x_slot: usize, y_slot: usize, target: Point) {
    let Geometry::Rectangle { points } = geometry else {
        return;
    };
    let opposite_x = points[1 - x_slot].x;
    let opposite_y = points[1 - y_slot].y;
    let x_ok = if corner.is_min_x() { target.x < opposite_x } else { target.x > opposite_x };
    let y_ok = if corner.is_min_y() { target.y < opposite_y } else { target.y > opposite_y };
    if x_ok {
        points[x_slot].x = target.x;
    }
    if y_ok {
        points[y_slot].y = target.y;
    }
}

/// Translate so the bounding box's top-left lands on `target_min`, kept on the surface.
fn drag_mover(geometry: &mut Geometry, target_min: Point, viewport: Viewport) {
    let Some(bounds) = geometry.bounds(viewport) else {
        return;
    };
    let max_x = (1.0 - bounds.width()).max(0.0);
    let max_y = (1.0 - bounds.height()).max(0.0);
    let clamped = Point::new(target_min.x.min(max_x).max(0.0), target_min.y.min(max_y).max(0.0));
    geometry.translate(clamped.delta_from(bounds.min));
    geometry.clamp();
}
