//! Shared constants for the regions crate.

// ── Shape defaults ──────────────────────────────────────────────

/// Stroke color for shapes created without an explicit style.
pub const DEFAULT_LINE_COLOR: &str = "#D94B4B";

/// Stroke width in pixels for shapes created without an explicit style.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

// ── Highlight and edit overlay ──────────────────────────────────

/// Stroke color of the hovered / manually highlighted shape.
pub const HIGHLIGHT_COLOR: &str = "#1E90FF";

/// Stroke width of the highlighted shape, in pixels.
pub const HIGHLIGHT_WIDTH: f64 = 3.0;

/// Half-size of an edit handle and its hit slop, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Edit handle fill.
pub const HANDLE_FILL: &str = "#fff";

/// Edit handle outline.
pub const HANDLE_STROKE: &str = "#1E90FF";

/// Translucent fill of the mover region.
pub const MOVER_FILL: &str = "rgba(30, 144, 255, 0.12)";

/// Dash segment length for the in-progress drawing preview, in pixels.
pub const PREVIEW_DASH_PX: f64 = 4.0;

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_DEFAULT: &str = "default";
pub const CURSOR_POINTER: &str = "pointer";
pub const CURSOR_CROSSHAIR: &str = "crosshair";
pub const CURSOR_MOVE: &str = "move";
pub const CURSOR_GRAB: &str = "grab";
