//! Detection session: hover highlighting and click selection.
//!
//! The session only decides *which* shape is under the pointer; the engine
//! paints the highlight and reports it.

#[cfg(test)]
#[path = "detect_test.rs"]
mod detect_test;

use crate::coords::{Point, Viewport};
use crate::doc::Shape;
use crate::hit;
use crate::order::order;

#[derive(Debug, Clone, Default)]
pub struct DetectSession {
    selected: Option<usize>,
}

impl DetectSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the shape currently under the pointer, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Re-run detection at `pt` (relative) and return the new selection.
    ///
    /// Shapes are walked in containment order and the last active match
    /// wins, so a nested rectangle beats its container.
    pub fn pointer_move(&mut self, shapes: &[Shape], pt: Point, viewport: Viewport) -> Option<usize> {
        self.selected = order(shapes)
            .into_iter()
            .rev()
            .find(|o| o.shape.is_active() && hit::contains(o.shape, pt, viewport))
            .map(|o| o.original_index);
        self.selected
    }

    /// The shape a click selects: whatever the last move detected.
    #[must_use]
    pub fn click(&self) -> Option<usize> {
        self.selected
    }

    /// Forget the current selection (e.g. after the list changed).
    pub fn reset(&mut self) {
        self.selected = None;
    }
}
