//! Rendering surfaces: the seam between the renderer and whatever owns pixels.
//!
//! The engine paints onto two surfaces of the same size: a background one for
//! the persisted shape list and a foreground one for ephemeral visuals (hover
//! highlight, drawing preview, edit handles). Coordinates passed to a
//! [`Surface`] are always in pixels.
//!
//! [`RecordingSurface`] is a headless implementation that records the
//! primitives painted since the last clear. Hosts without a display and the
//! test suite use it to observe rendering.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::coords::{Bounds, Point, Viewport};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
    #[error("2d context unavailable")]
    NoContext,
}

/// Stroke style for outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// CSS color string.
    pub color: String,
    /// Line width in pixels.
    pub width: f64,
    /// Dash segment length in pixels; solid when `None`.
    pub dash: Option<f64>,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width, dash: None }
    }

    #[must_use]
    pub fn dashed(color: impl Into<String>, width: f64, dash: f64) -> Self {
        Self { color: color.into(), width, dash: Some(dash) }
    }
}

/// A pixel surface the renderer can paint onto.
pub trait Surface {
    /// Current pixel size.
    fn viewport(&self) -> Viewport;

    /// Change the pixel size. Content may be discarded.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing surface rejects the new size.
    fn resize(&mut self, viewport: Viewport) -> Result<(), RenderError>;

    /// Erase every pixel.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing surface call fails.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Stroke a polyline through `points`, closing it back to the first point when `closed`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing surface call fails.
    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: &Stroke) -> Result<(), RenderError>;

    /// Stroke a circle.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing surface call fails.
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), RenderError>;

    /// Fill an axis-aligned rectangle.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backing surface call fails.
    fn fill_rect(&mut self, rect: Bounds, color: &str) -> Result<(), RenderError>;
}

/// One primitive painted onto a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Path { points: Vec<Point>, closed: bool, stroke: Stroke },
    Circle { center: Point, radius: f64, stroke: Stroke },
    FillRect { rect: Bounds, color: String },
}

/// Headless surface that keeps the primitives painted since the last clear.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { viewport: Viewport::new(width, height), commands: Vec::new(), clears: 0 }
    }

    /// Primitives painted since the last clear, in paint order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears since construction.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Whether nothing has been painted since the last clear.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), RenderError> {
        self.viewport = viewport;
        self.commands.clear();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        self.commands.clear();
        self.clears += 1;
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: &Stroke) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Path { points: points.to_vec(), closed, stroke: stroke.clone() });
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Circle { center, radius, stroke: stroke.clone() });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Bounds, color: &str) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::FillRect { rect, color: color.to_string() });
        Ok(())
    }
}
