//! The annotation engine: owns the shape list, both surfaces, and the active session.
//!
//! Input handlers take pixel coordinates relative to the foreground surface
//! and return [`Action`]s for the host to process. Rendering happens inside
//! the engine; a failing surface call is logged and never surfaces to the
//! caller.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::consts::{CURSOR_CROSSHAIR, CURSOR_DEFAULT, CURSOR_GRAB, CURSOR_MOVE, CURSOR_POINTER};
use crate::coords::{Point, Viewport};
use crate::detect::DetectSession;
use crate::doc::{ObjectQuery, Selector, Shape, ShapeId, ShapeStore, Status};
use crate::draw::{DrawSession, DrawStep};
use crate::edit::{self, EditSession, EditStep};
use crate::hit::EditPart;
use crate::input::{Button, EditTarget, Mode, ModeKind};
use crate::order::{Ordered, order};
use crate::render;
use crate::surface::{RenderError, Surface};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Detection found a shape under the pointer.
    Hovered { index: usize, id: ShapeId },
    /// A click landed on the hovered shape.
    Selected { index: usize, id: ShapeId },
    /// A drawing session committed a new shape.
    ShapeCreated { index: usize, shape: Shape },
    /// An edit changed a shape (also sent once more when editing ends).
    ShapeEdited { index: usize, shape: Shape },
    /// The user clicked away from the shape being edited.
    EditFinished { index: usize, id: ShapeId },
    SetCursor(String),
}

/// The active interaction mode and its state.
#[derive(Debug, Clone)]
enum Session {
    /// Detection requested over an empty list; nothing to hit.
    Idle,
    Detect(DetectSession),
    Draw(DrawSession),
    Edit(EditSession),
}

pub struct Engine<S: Surface> {
    background: S,
    foreground: S,
    config: EngineConfig,
    store: ShapeStore,
    session: Session,
    /// Shape highlighted by [`Engine::highlight_object`], independent of hover.
    highlighted: Option<ShapeId>,
    cursor: String,
}

impl<S: Surface> Engine<S> {
    /// Create an engine over two surfaces of the same size, with no shapes.
    #[must_use]
    pub fn new(background: S, foreground: S, config: EngineConfig) -> Self {
        Self {
            background,
            foreground,
            config,
            store: ShapeStore::new(),
            session: Session::Idle,
            highlighted: None,
            cursor: CURSOR_DEFAULT.to_string(),
        }
    }

    /// Builder form of [`Engine::init`].
    #[must_use]
    pub fn with_shapes(mut self, shapes: Vec<Shape>) -> Self {
        self.init(shapes);
        self
    }

    // --- Data inputs ---

    /// Load the initial shape list, paint it, and start detection.
    pub fn init(&mut self, shapes: Vec<Shape>) {
        let count = self.reset(shapes);
        info!(count, "engine initialized");
    }

    /// Replace every shape, dropping whatever session was running.
    pub fn reinit(&mut self, shapes: Vec<Shape>) {
        let count = self.reset(shapes);
        info!(count, "shapes replaced");
    }

    /// Append one shape and paint it. Returns its index, or `None` if refused.
    pub fn draw_object(&mut self, shape: Shape) -> Option<usize> {
        let index = self.store.push(shape)?;
        debug!(index, "shape added");
        self.after_list_change();
        Some(index)
    }

    /// Append several shapes. Returns the indices of those accepted.
    pub fn draw_objects(&mut self, shapes: impl IntoIterator<Item = Shape>) -> Vec<usize> {
        let indices: Vec<usize> = shapes.into_iter().filter_map(|s| self.store.push(s)).collect();
        debug!(count = indices.len(), "shapes added");
        self.after_list_change();
        indices
    }

    /// Repaint the background. Without `keep_handlers` the session is torn
    /// down and detection restarts.
    pub fn redraw_objects(&mut self, keep_handlers: bool) {
        self.paint_background();
        if keep_handlers {
            self.paint_foreground();
        } else {
            let session = self.detect_session();
            self.switch_session(session);
        }
    }

    /// Set `status` on every selected shape. Returns how many matched.
    pub fn set_object_status(&mut self, status: Status, selector: &Selector) -> usize {
        let indices = self.store.select(selector);
        for &index in &indices {
            if let Some(shape) = self.store.get_mut(index) {
                shape.status = status;
            }
        }
        debug!(count = indices.len(), status = status.as_str(), "status updated");
        self.after_list_change();
        indices.len()
    }

    /// Set attribute `name` on every selected shape. Returns how many were updated.
    ///
    /// Values of the wrong type for a built-in attribute are skipped with a warning.
    pub fn set_object_attribute(&mut self, name: &str, value: &Value, selector: &Selector) -> usize {
        let mut updated = 0;
        for index in self.store.select(selector) {
            let Some(shape) = self.store.get_mut(index) else {
                continue;
            };
            match shape.set_attr(name, value.clone()) {
                Ok(()) => updated += 1,
                Err(error) => warn!(%error, index, attr = name, "attribute not set"),
            }
        }
        debug!(count = updated, attr = name, "attribute updated");
        self.after_list_change();
        updated
    }

    /// Remove every selected shape and return them.
    pub fn delete_object(&mut self, selector: &Selector) -> Vec<Shape> {
        let removed = self.store.remove_where(selector);
        if !removed.is_empty() {
            info!(count = removed.len(), remaining = self.store.len(), "shapes deleted");
        }
        self.after_list_change();
        removed
    }

    // --- Modes ---

    /// Switch interaction mode.
    ///
    /// Returns `false`, leaving the current session untouched, when an edit
    /// target is out of range or not active. The new cursor is available
    /// from [`Engine::cursor`].
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let next = match mode {
            Mode::Detect => self.detect_session(),
            Mode::Draw(options) => Session::Draw(DrawSession::new(options)),
            Mode::Edit(target) => {
                let Some(id) = self.resolve_edit_target(target) else {
                    debug!(?target, "edit target unavailable, mode unchanged");
                    return false;
                };
                Session::Edit(EditSession::new(id))
            }
        };
        self.switch_session(next);
        true
    }

    /// Highlight the shape at `index` on the foreground. Returns `false` if there is none.
    pub fn highlight_object(&mut self, index: usize) -> bool {
        let Some(shape) = self.store.get(index) else {
            debug!(index, "highlight index out of range");
            return false;
        };
        self.highlighted = Some(shape.id);
        self.paint_foreground();
        true
    }

    /// Drop every highlight, manual or hover.
    pub fn unhighlight_objects(&mut self) {
        self.highlighted = None;
        if let Session::Detect(detect) = &mut self.session {
            detect.reset();
        }
        self.paint_foreground();
    }

    /// Resize both surfaces and repaint. Stored geometry is untouched.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        let viewport = Viewport::new(width, height);
        report(self.background.resize(viewport), "background");
        report(self.foreground.resize(viewport), "foreground");
        debug!(width, height, "viewport resized");
        self.paint_background();
        self.paint_foreground();
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, px: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let pt = self.pointer(px);
        match self.mode() {
            ModeKind::Draw => self.draw_event(|draw, _| draw.pointer_down(pt)),
            ModeKind::Edit => self.edit_pointer_down(pt),
            ModeKind::Idle | ModeKind::Detect => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, px: Point) -> Vec<Action> {
        let pt = self.pointer(px);
        match self.mode() {
            ModeKind::Detect => self.detect_move(pt),
            ModeKind::Draw => self.draw_event(|draw, vp| draw.pointer_move(pt, vp)),
            ModeKind::Edit => self.edit_pointer_move(pt),
            ModeKind::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, px: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let pt = self.pointer(px);
        match self.mode() {
            ModeKind::Draw => self.draw_event(|draw, vp| draw.pointer_up(pt, vp)),
            ModeKind::Edit => self.edit_pointer_up(pt),
            ModeKind::Idle | ModeKind::Detect => Vec::new(),
        }
    }

    pub fn on_click(&mut self, px: Point) -> Vec<Action> {
        let pt = self.pointer(px);
        match self.mode() {
            ModeKind::Detect => self.detect_click(),
            ModeKind::Edit => self.edit_click(pt),
            ModeKind::Idle | ModeKind::Draw => Vec::new(),
        }
    }

    pub fn on_double_click(&mut self, _px: Point) -> Vec<Action> {
        match self.mode() {
            ModeKind::Draw => self.draw_event(|draw, _| draw.double_click()),
            ModeKind::Idle | ModeKind::Detect | ModeKind::Edit => Vec::new(),
        }
    }

    // --- Queries ---

    /// Shapes matching `query`, in list order.
    #[must_use]
    pub fn return_objects(&self, query: ObjectQuery) -> Vec<&Shape> {
        self.store.query(query)
    }

    /// First shape whose attribute `name` equals `value`.
    #[must_use]
    pub fn search_object(&self, name: &str, value: &Value) -> Option<(usize, &Shape)> {
        self.store.find_attr(name, value)
    }

    /// Shapes in the order detection walks them.
    #[must_use]
    pub fn return_geometrical_order(&self) -> Vec<Ordered<'_>> {
        order(self.store.shapes())
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.store.shapes()
    }

    #[must_use]
    pub fn mode(&self) -> ModeKind {
        match self.session {
            Session::Idle => ModeKind::Idle,
            Session::Detect(_) => ModeKind::Detect,
            Session::Draw(_) => ModeKind::Draw,
            Session::Edit(_) => ModeKind::Edit,
        }
    }

    /// Index of the shape detection currently has under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        match &self.session {
            Session::Detect(detect) => detect.selected(),
            Session::Idle | Session::Draw(_) | Session::Edit(_) => None,
        }
    }

    /// Id of the shape being edited.
    #[must_use]
    pub fn editing(&self) -> Option<ShapeId> {
        match &self.session {
            Session::Edit(edit) => Some(edit.target()),
            Session::Idle | Session::Detect(_) | Session::Draw(_) => None,
        }
    }

    /// The cursor the host should show over the foreground.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn background(&self) -> &S {
        &self.background
    }

    #[must_use]
    pub fn foreground(&self) -> &S {
        &self.foreground
    }

    // =============================================================
    // Sessions
    // =============================================================

    fn reset(&mut self, shapes: Vec<Shape>) -> usize {
        self.session = Session::Idle;
        self.highlighted = None;
        let count = self.store.replace_all(shapes);
        self.paint_background();
        let session = self.detect_session();
        self.switch_session(session);
        count
    }

    /// Detection over the current list, or idle when there is nothing to detect.
    fn detect_session(&self) -> Session {
        if self.store.is_empty() {
            Session::Idle
        } else {
            Session::Detect(DetectSession::new())
        }
    }

    /// Drop the current session, clear the foreground, and start `next`.
    fn switch_session(&mut self, next: Session) -> Vec<Action> {
        let from = self.mode();
        self.session = next;
        self.highlighted = None;
        let to = self.mode();
        debug!(from = from.as_str(), to = to.as_str(), "mode switched");
        self.paint_foreground();
        self.set_cursor(match to {
            ModeKind::Draw => CURSOR_CROSSHAIR,
            ModeKind::Idle | ModeKind::Detect | ModeKind::Edit => CURSOR_DEFAULT,
        })
    }

    /// Keep the session consistent with a list that was just edited from outside.
    fn after_list_change(&mut self) {
        self.paint_background();
        if let Some(id) = self.highlighted
            && self.store.index_of(id).is_none()
        {
            self.highlighted = None;
        }
        let target_lost = matches!(self.session, Session::Edit(_)) && self.edit_target().is_none();
        match &mut self.session {
            Session::Idle if !self.store.is_empty() => {
                self.switch_session(Session::Detect(DetectSession::new()));
            }
            Session::Detect(_) if self.store.is_empty() => {
                self.switch_session(Session::Idle);
            }
            Session::Detect(detect) => {
                detect.reset();
                self.paint_foreground();
            }
            Session::Edit(_) if target_lost => {
                debug!("edit target gone, resuming detection");
                let session = self.detect_session();
                self.switch_session(session);
            }
            Session::Idle | Session::Draw(_) | Session::Edit(_) => self.paint_foreground(),
        }
    }

    fn resolve_edit_target(&self, target: EditTarget) -> Option<ShapeId> {
        let shape = match target {
            EditTarget::Index(index) => self.store.get(index),
            EditTarget::Id(id) => self.store.index_of(id).and_then(|i| self.store.get(i)),
        }?;
        shape.is_active().then_some(shape.id)
    }

    /// Current index of the shape being edited, if it still exists and is active.
    fn edit_target(&self) -> Option<usize> {
        let Session::Edit(edit) = &self.session else {
            return None;
        };
        let index = self.store.index_of(edit.target())?;
        self.store.get(index).filter(|s| s.is_active()).map(|_| index)
    }

    fn pointer(&self, px: Point) -> Point {
        self.foreground.viewport().to_relative(px)
    }

    fn set_cursor(&mut self, cursor: &str) -> Vec<Action> {
        if self.cursor == cursor {
            return Vec::new();
        }
        self.cursor = cursor.to_string();
        vec![Action::SetCursor(self.cursor.clone())]
    }

    // =============================================================
    // Detect
    // =============================================================

    fn detect_move(&mut self, pt: Point) -> Vec<Action> {
        let vp = self.foreground.viewport();
        let Session::Detect(detect) = &mut self.session else {
            return Vec::new();
        };
        let hovered = detect.pointer_move(self.store.shapes(), pt, vp);
        self.highlighted = None;
        self.paint_foreground();

        let mut actions = self.set_cursor(if hovered.is_some() { CURSOR_POINTER } else { CURSOR_DEFAULT });
        if let Some(index) = hovered
            && let Some(shape) = self.store.get(index)
        {
            actions.push(Action::Hovered { index, id: shape.id });
        }
        actions
    }

    fn detect_click(&self) -> Vec<Action> {
        let Session::Detect(detect) = &self.session else {
            return Vec::new();
        };
        let Some((index, shape)) = detect.click().and_then(|i| self.store.get(i).map(|s| (i, s))) else {
            return Vec::new();
        };
        debug!(index, id = %shape.id, "shape selected");
        vec![Action::Selected { index, id: shape.id }]
    }

    // =============================================================
    // Draw
    // =============================================================

    fn draw_event(&mut self, event: impl FnOnce(&mut DrawSession, Viewport) -> DrawStep) -> Vec<Action> {
        let vp = self.foreground.viewport();
        let Session::Draw(draw) = &mut self.session else {
            return Vec::new();
        };
        match event(draw, vp) {
            DrawStep::Ignored => Vec::new(),
            DrawStep::Preview => {
                self.paint_foreground();
                Vec::new()
            }
            DrawStep::Commit(shape) => self.commit(shape),
        }
    }

    fn commit(&mut self, shape: Shape) -> Vec<Action> {
        let Some(index) = self.store.push(shape) else {
            return Vec::new();
        };
        self.paint_background();
        let Some(shape) = self.store.get(index).cloned() else {
            return Vec::new();
        };
        info!(index, id = %shape.id, kind = shape.kind().as_str(), "shape created");
        let mut actions = vec![Action::ShapeCreated { index, shape }];
        let session = self.detect_session();
        actions.extend(self.switch_session(session));
        actions
    }

    // =============================================================
    // Edit
    // =============================================================

    fn end_lost_edit(&mut self) -> Vec<Action> {
        debug!("edit target gone, resuming detection");
        let session = self.detect_session();
        self.switch_session(session)
    }

    fn edit_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let Some(index) = self.edit_target() else {
            return self.end_lost_edit();
        };
        let vp = self.foreground.viewport();
        let slop = self.config.handle_radius_px;
        let (Session::Edit(edit), Some(shape)) = (&mut self.session, self.store.get(index)) else {
            return Vec::new();
        };
        match edit.pointer_down(&shape.geometry, pt, vp, slop) {
            EditStep::Grabbed(EditPart::Mover) => self.set_cursor(CURSOR_MOVE),
            EditStep::Grabbed(EditPart::Handle(_)) => self.set_cursor(CURSOR_GRAB),
            EditStep::Ignored | EditStep::Changed | EditStep::Released | EditStep::Finished => Vec::new(),
        }
    }

    fn edit_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let Some(index) = self.edit_target() else {
            return self.end_lost_edit();
        };
        let vp = self.foreground.viewport();
        let slop = self.config.handle_radius_px;
        let (Session::Edit(edit), Some(shape)) = (&mut self.session, self.store.get_mut(index)) else {
            return Vec::new();
        };
        if !edit.is_dragging() {
            let cursor = edit::cursor_at(&shape.geometry, pt, vp, slop);
            return self.set_cursor(cursor);
        }
        if edit.pointer_move(&mut shape.geometry, pt, vp) != EditStep::Changed {
            return Vec::new();
        }
        let shape = shape.clone();
        self.paint_background();
        self.paint_foreground();
        vec![Action::ShapeEdited { index, shape }]
    }

    fn edit_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        let Some(index) = self.edit_target() else {
            return self.end_lost_edit();
        };
        let vp = self.foreground.viewport();
        let slop = self.config.handle_radius_px;
        let (Session::Edit(edit), Some(shape)) = (&mut self.session, self.store.get(index)) else {
            return Vec::new();
        };
        if edit.pointer_up() != EditStep::Released {
            return Vec::new();
        }
        let cursor = edit::cursor_at(&shape.geometry, pt, vp, slop);
        self.set_cursor(cursor)
    }

    fn edit_click(&mut self, pt: Point) -> Vec<Action> {
        let Some(index) = self.edit_target() else {
            return self.end_lost_edit();
        };
        let vp = self.foreground.viewport();
        let slop = self.config.handle_radius_px;
        let (Session::Edit(edit), Some(shape)) = (&mut self.session, self.store.get(index)) else {
            return Vec::new();
        };
        if edit.click(&shape.geometry, pt, vp, slop) != EditStep::Finished {
            return Vec::new();
        }
        let shape = shape.clone();
        let id = shape.id;
        info!(index, %id, "edit finished");
        let mut actions = vec![Action::ShapeEdited { index, shape }, Action::EditFinished { index, id }];
        let session = self.detect_session();
        actions.extend(self.switch_session(session));
        actions
    }

    // =============================================================
    // Painting
    // =============================================================

    fn paint_background(&mut self) {
        report(render::redraw_all(&mut self.background, self.store.shapes()), "background");
    }

    fn paint_foreground(&mut self) {
        let result = paint_session(&mut self.foreground, &self.session, &self.store, self.highlighted, &self.config);
        report(result, "foreground");
    }
}

/// Repaint the foreground from scratch for the current session.
fn paint_session<S: Surface>(
    surface: &mut S,
    session: &Session,
    store: &ShapeStore,
    highlighted: Option<ShapeId>,
    config: &EngineConfig,
) -> Result<(), RenderError> {
    render::clear(surface)?;
    if let Some(shape) = highlighted.and_then(|id| store.index_of(id)).and_then(|i| store.get(i)) {
        render::draw_highlight(surface, shape, config)?;
    }
    match session {
        Session::Idle => Ok(()),
        Session::Detect(detect) => match detect.selected().and_then(|i| store.get(i)) {
            Some(shape) => render::draw_highlight(surface, shape, config),
            None => Ok(()),
        },
        Session::Draw(draw) => match draw.draft() {
            Some(draft) => {
                let options = draw.options();
                render::draw_preview(surface, &draft, &options.line_color, options.line_width, config)
            }
            None => Ok(()),
        },
        Session::Edit(edit) => {
            let shape = store.index_of(edit.target()).and_then(|i| store.get(i));
            match shape.and_then(|s| edit::overlay(&s.geometry, surface.viewport())) {
                Some(overlay) => render::draw_edit_overlay(surface, &overlay, config),
                None => Ok(()),
            }
        }
    }
}

fn report(result: Result<(), RenderError>, layer: &'static str) {
    if let Err(error) = result {
        warn!(%error, layer, "render failed");
    }
}
