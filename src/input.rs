//! Input model: mouse buttons, mode requests, and drawing options.
//!
//! These are the types a host hands to [`crate::engine::Engine`] to switch
//! interaction mode or to describe a pointer event. The per-mode state
//! machines live in [`crate::detect`], [`crate::draw`] and [`crate::edit`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH};
use crate::doc::{ShapeId, ShapeKind};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// What a drawing session produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub kind: ShapeKind,
    /// CSS color of the committed shape.
    pub line_color: String,
    /// Stroke width of the committed shape, in pixels.
    pub line_width: f64,
}

impl DrawOptions {
    /// Options for `kind` with the default style.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self { kind, line_color: DEFAULT_LINE_COLOR.to_string(), line_width: DEFAULT_LINE_WIDTH }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.line_color = color.into();
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

/// Which shape an edit session should open on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Position in the shape list at the time of the request.
    Index(usize),
    Id(ShapeId),
}

/// A mode switch request.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Hover highlighting and click selection.
    Detect,
    /// Draw one new shape, then return to detection.
    Draw(DrawOptions),
    /// Edit one existing shape until the user clicks away.
    Edit(EditTarget),
}

/// The mode the engine is currently in, without its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// No session bound (detection over an empty list).
    Idle,
    Detect,
    Draw,
    Edit,
}

impl ModeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Detect => "detect",
            Self::Draw => "draw",
            Self::Edit => "edit",
        }
    }
}
