//! Rendering: paints shapes and interaction overlays onto a [`Surface`].
//!
//! Stored geometry is relative; every function here converts to pixels with
//! the surface's *current* viewport at paint time. Nothing in this module
//! mutates shape state.
//!
//! Fallible surface calls propagate via `Result<(), RenderError>`. The
//! top-level caller ([`crate::engine::Engine`]) logs and moves on.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::EngineConfig;
use crate::coords::{Bounds, Point, Viewport};
use crate::doc::{Geometry, Shape, Status};
use crate::surface::{RenderError, Stroke, Surface};

/// Pixel-space overlay shown while editing a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOverlay {
    /// Mover region, in pixels.
    pub mover: Bounds,
    /// Handle centers, in pixels.
    pub handles: Vec<Point>,
}

/// Erase the whole surface.
///
/// # Errors
///
/// Returns `Err` if the surface call fails.
pub fn clear<S: Surface>(surface: &mut S) -> Result<(), RenderError> {
    surface.clear()
}

/// Clear, then paint every visible shape in list order.
///
/// # Errors
///
/// Returns `Err` on the first failing surface call.
pub fn redraw_all<S: Surface>(surface: &mut S, shapes: &[Shape]) -> Result<(), RenderError> {
    surface.clear()?;
    for shape in shapes {
        draw_shape(surface, shape, false)?;
    }
    Ok(())
}

/// Paint one shape with its own style. Hidden shapes are skipped.
///
/// `open` leaves a polygon's path unclosed.
///
/// # Errors
///
/// Returns `Err` if the surface call fails.
pub fn draw_shape<S: Surface>(surface: &mut S, shape: &Shape, open: bool) -> Result<(), RenderError> {
    if shape.status == Status::Hidden {
        return Ok(());
    }
    stroke_geometry(surface, &shape.geometry, &shape_stroke(shape), open)
}

/// Stroke style a shape is painted with. Inactive shapes draw at half width.
#[must_use]
pub fn shape_stroke(shape: &Shape) -> Stroke {
    let width = match shape.status {
        Status::Inactive => shape.line_width / 2.0,
        Status::Active | Status::Hidden => shape.line_width,
    };
    Stroke::solid(shape.line_color.clone(), width)
}

/// Paint `shape` restyled with the highlight color and width.
///
/// # Errors
///
/// Returns `Err` if the surface call fails.
pub fn draw_highlight<S: Surface>(surface: &mut S, shape: &Shape, config: &EngineConfig) -> Result<(), RenderError> {
    if shape.status == Status::Hidden {
        return Ok(());
    }
    let stroke = Stroke::solid(config.highlight_color.clone(), config.highlight_width);
    stroke_geometry(surface, &shape.geometry, &stroke, false)
}

/// Paint an in-progress draft with a dashed stroke. Polygons stay open.
///
/// # Errors
///
/// Returns `Err` if the surface call fails.
pub fn draw_preview<S: Surface>(
    surface: &mut S,
    geometry: &Geometry,
    color: &str,
    width: f64,
    config: &EngineConfig,
) -> Result<(), RenderError> {
    let stroke = Stroke::dashed(color, width, config.preview_dash_px);
    stroke_geometry(surface, geometry, &stroke, true)
}

/// Paint the mover fill and a square per handle.
///
/// # Errors
///
/// Returns `Err` if the surface call fails.
pub fn draw_edit_overlay<S: Surface>(
    surface: &mut S,
    overlay: &EditOverlay,
    config: &EngineConfig,
) -> Result<(), RenderError> {
    surface.fill_rect(overlay.mover, &config.mover_fill)?;
    let r = config.handle_radius_px;
    let outline = Stroke::solid(config.handle_stroke.clone(), 1.0);
    for center in &overlay.handles {
        let square = Bounds::around(*center, r, r);
        surface.fill_rect(square, &config.handle_fill)?;
        surface.stroke_path(&square.corners(), true, &outline)?;
    }
    Ok(())
}

// =============================================================
// Geometry
// =============================================================

fn stroke_geometry<S: Surface>(
    surface: &mut S,
    geometry: &Geometry,
    stroke: &Stroke,
    open: bool,
) -> Result<(), RenderError> {
    let vp = surface.viewport();
    match geometry {
        Geometry::Rectangle { points } => {
            let corners = Bounds::from_corners(points[0], points[1]).corners();
            surface.stroke_path(&to_pixels(vp, &corners), true, stroke)
        }
        Geometry::Polygon { points } => surface.stroke_path(&to_pixels(vp, points), !open, stroke),
        Geometry::Circle { center, radius } => {
            surface.stroke_circle(vp.to_pixels(*center), radius.effective(vp), stroke)
        }
    }
}

fn to_pixels(vp: Viewport, points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| vp.to_pixels(*p)).collect()
}
