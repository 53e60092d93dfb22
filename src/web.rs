//! Browser surface backed by an `HtmlCanvasElement` 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Fallible `Canvas2D` calls are mapped to [`RenderError::Canvas`].

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::EngineConfig;
use crate::coords::{Bounds, Point, Viewport};
use crate::engine::Engine;
use crate::surface::{RenderError, Stroke, Surface};

/// An engine painting into two stacked canvas elements.
pub type CanvasEngine = Engine<CanvasSurface>;

impl Engine<CanvasSurface> {
    /// Bind to a background and a foreground canvas of the same size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either element has no usable 2D context.
    pub fn from_canvases(
        background: HtmlCanvasElement,
        foreground: HtmlCanvasElement,
        config: EngineConfig,
    ) -> Result<Self, RenderError> {
        let engine = Self::new(CanvasSurface::new(background)?, CanvasSurface::new(foreground)?, config);
        tracing::debug!(viewport = ?engine.foreground().viewport(), "canvas engine bound");
        Ok(engine)
    }
}

/// A [`Surface`] that paints into a canvas element.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to `canvas`, acquiring its 2D context.
    ///
    /// # Errors
    ///
    /// Returns `NoContext` if the element has no 2D context, and `Canvas` if
    /// the browser rejects the request.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(RenderError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// The underlying canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Run `paint` with `stroke` applied, restoring the context state afterwards.
    fn stroked<F>(&self, stroke: &Stroke, paint: F) -> Result<(), RenderError>
    where
        F: FnOnce(&CanvasRenderingContext2d) -> Result<(), RenderError>,
    {
        self.ctx.save();
        let result = self.apply_stroke(stroke).and_then(|()| paint(&self.ctx));
        self.ctx.restore();
        result
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<(), RenderError> {
        self.ctx.set_stroke_style_str(&stroke.color);
        self.ctx.set_line_width(stroke.width);
        let dash = js_sys::Array::new();
        if let Some(len) = stroke.dash {
            dash.push(&len.into());
            dash.push(&len.into());
        }
        self.ctx.set_line_dash(&dash).map_err(js_error)
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, viewport: Viewport) -> Result<(), RenderError> {
        self.canvas.set_width(viewport.width.max(0.0).round() as u32);
        self.canvas.set_height(viewport.height.max(0.0).round() as u32);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        let vp = self.viewport();
        self.ctx.clear_rect(0.0, 0.0, vp.width, vp.height);
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: &Stroke) -> Result<(), RenderError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.stroked(stroke, |ctx| {
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            if closed {
                ctx.close_path();
            }
            ctx.stroke();
            Ok(())
        })
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), RenderError> {
        self.stroked(stroke, |ctx| {
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI).map_err(js_error)?;
            ctx.stroke();
            Ok(())
        })
    }

    fn fill_rect(&mut self, rect: Bounds, color: &str) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.min.x, rect.min.y, rect.width(), rect.height());
        Ok(())
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Canvas(format!("{value:?}"))
}
