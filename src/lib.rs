//! Interactive vector annotation over an image.
//!
//! The crate keeps an ordered list of region shapes (rectangles, polygons,
//! circles) in surface-relative coordinates and paints them onto a pair of
//! stacked surfaces: a background for the persisted shapes and a foreground
//! for hover highlights, drawing previews and edit handles. Pointer events
//! drive one of three mutually exclusive sessions (detect, draw, edit); the
//! host wires DOM events to the [`engine::Engine`] and reacts to the
//! [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine: model operations, mode switching, event dispatch |
//! | [`doc`] | Shape types, attributes, selectors and the in-memory store |
//! | [`coords`] | Relative/pixel points, radii, bounding boxes, viewports |
//! | [`order`] | Containment-aware traversal order for hit-testing |
//! | [`hit`] | Bounding-box hit-testing and edit handle geometry |
//! | [`detect`] | Hover/click detection session |
//! | [`draw`] | Shape drawing session |
//! | [`edit`] | Shape editing session |
//! | [`input`] | Buttons, mode requests and drawing options |
//! | [`render`] | Painting shapes and overlays onto a surface |
//! | [`surface`] | The [`surface::Surface`] trait and a recording implementation |
//! | [`web`] | `HtmlCanvasElement`-backed surface |
//! | [`config`] | Overlay look, loadable from JSON |
//! | [`consts`] | Default colors, sizes and cursors |

pub mod config;
pub mod consts;
pub mod coords;
pub mod detect;
pub mod doc;
pub mod draw;
pub mod edit;
pub mod engine;
pub mod hit;
pub mod input;
pub mod order;
pub mod render;
pub mod surface;
pub mod web;

pub use engine::{Action, Engine};
