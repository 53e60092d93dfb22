//! Geometry model: shapes, their attributes, and the ordered in-memory store.
//!
//! A [`Shape`] is a closed variant ([`Geometry`]) plus the attributes every
//! shape carries (`line_color`, `line_width`, `status`) and an open-ended
//! `props` bag for host-defined attributes. The [`ShapeStore`] keeps shapes in
//! insertion order, which is both the paint order and the pre-ordering
//! hit-test order.
//!
//! Shapes carry a stable [`ShapeId`] so interaction sessions can hold on to a
//! shape across deletions and insertions that shift positional indices.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_LINE_WIDTH};
use crate::coords::{Bounds, Point, Radius, Viewport};

/// Stable identifier for a shape.
pub type ShapeId = Uuid;

/// Paint and interaction state of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Painted at full width; eligible for hover, selection and editing.
    #[default]
    Active,
    /// Not painted and never hit.
    Hidden,
    /// Painted at half width; never hit.
    Inactive,
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hidden => "hidden",
            Self::Inactive => "inactive",
        }
    }

    /// Parse the lowercase wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "hidden" => Some(Self::Hidden),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Shape type without its geometry, used to request a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Circle,
}

impl ShapeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
            Self::Circle => "circle",
        }
    }
}

/// The geometric part of a shape, in relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    /// Two opposite corners, in any order.
    Rectangle { points: [Point; 2] },
    /// Vertices in drawing order; at least three once stored.
    Polygon { points: Vec<Point> },
    /// Center plus anisotropic radius (see [`Radius::effective`]).
    Circle { center: Point, radius: Radius },
}

impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Axis-aligned bounding box in relative space.
    ///
    /// Circles need the viewport because their extent depends on the effective
    /// pixel radius. Returns `None` only for a polygon without vertices.
    #[must_use]
    pub fn bounds(&self, viewport: Viewport) -> Option<Bounds> {
        match self {
            Self::Rectangle { points } => Some(Bounds::from_corners(points[0], points[1])),
            Self::Polygon { points } => Bounds::from_points(points.iter().copied()),
            Self::Circle { center, radius } => {
                if viewport.is_empty() {
                    return Some(Bounds::around(*center, 0.0, 0.0));
                }
                let r = radius.effective(viewport);
                Some(Bounds::around(*center, r / viewport.width, r / viewport.height))
            }
        }
    }

    /// Move every point by `delta` (relative).
    pub fn translate(&mut self, delta: Point) {
        match self {
            Self::Rectangle { points } => {
                for p in points.iter_mut() {
                    *p = p.offset_by(delta);
                }
            }
            Self::Polygon { points } => {
                for p in points.iter_mut() {
                    *p = p.offset_by(delta);
                }
            }
            Self::Circle { center, .. } => *center = center.offset_by(delta),
        }
    }

    /// Clamp every point into `[0, 1]` and make the radius non-negative.
    pub fn clamp(&mut self) {
        match self {
            Self::Rectangle { points } => {
                for p in points.iter_mut() {
                    *p = p.clamped();
                }
            }
            Self::Polygon { points } => {
                for p in points.iter_mut() {
                    *p = p.clamped();
                }
            }
            Self::Circle { center, radius } => {
                *center = center.clamped();
                *radius = Radius::new(radius.x.abs(), radius.y.abs());
            }
        }
    }

    /// Whether the geometry satisfies the stored-shape invariants.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Rectangle { .. } | Self::Circle { .. } => true,
            Self::Polygon { points } => points.len() >= 3,
        }
    }
}

/// A region drawn over the background image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Stable identity, assigned at construction.
    #[serde(default = "Uuid::new_v4")]
    pub id: ShapeId,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Stroke color as a CSS color string.
    pub line_color: String,
    /// Stroke width in pixels (halved while inactive).
    pub line_width: f64,
    #[serde(default)]
    pub status: Status,
    /// Host-defined attributes. `Null` until the first one is set.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub props: Value,
}

impl Shape {
    /// New active shape with the default style.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            line_color: DEFAULT_LINE_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            status: Status::Active,
            props: Value::Null,
        }
    }

    #[must_use]
    pub fn rectangle(a: Point, b: Point) -> Self {
        Self::new(Geometry::Rectangle { points: [a, b] })
    }

    #[must_use]
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(Geometry::Polygon { points })
    }

    #[must_use]
    pub fn circle(center: Point, radius: Radius) -> Self {
        Self::new(Geometry::Circle { center, radius })
    }

    #[must_use]
    pub fn with_style(mut self, line_color: impl Into<String>, line_width: f64) -> Self {
        self.line_color = line_color.into();
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Read an attribute by name.
    ///
    /// Built-ins (`type`, `id`, `lineColor`, `lineWidth`, `status`, also in
    /// snake case) are answered from typed fields; anything else is looked
    /// up in `props`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<Value> {
        match name {
            "type" => Some(Value::from(self.kind().as_str())),
            "id" => Some(Value::from(self.id.to_string())),
            "lineColor" | "line_color" => Some(Value::from(self.line_color.clone())),
            "lineWidth" | "line_width" => Some(Value::from(self.line_width)),
            "status" => Some(Value::from(self.status.as_str())),
            _ => self.props.get(name).cloned(),
        }
    }

    /// Whether attribute `name` equals `value`. Numbers compare by value.
    #[must_use]
    pub fn matches_attr(&self, name: &str, value: &Value) -> bool {
        self.attr(name).is_some_and(|own| values_match(&own, value))
    }

    /// Write an attribute by name.
    ///
    /// Setting a `props` key to `null` removes it.
    ///
    /// # Errors
    ///
    /// Returns `ReadOnly` for `type` and `id`, and `WrongType` when a built-in
    /// attribute receives a value it cannot hold.
    pub fn set_attr(&mut self, name: &str, value: Value) -> Result<(), AttrError> {
        match name {
            "type" | "id" => Err(AttrError::ReadOnly(name.to_string())),
            "lineColor" | "line_color" => {
                let color = value
                    .as_str()
                    .ok_or_else(|| AttrError::wrong_type(name, "a color string"))?;
                self.line_color = color.to_string();
                Ok(())
            }
            "lineWidth" | "line_width" => {
                let width = value
                    .as_f64()
                    .filter(|w| *w >= 0.0)
                    .ok_or_else(|| AttrError::wrong_type(name, "a non-negative number"))?;
                self.line_width = width;
                Ok(())
            }
            "status" => {
                let status = value
                    .as_str()
                    .and_then(Status::parse)
                    .ok_or_else(|| AttrError::wrong_type(name, "active, hidden or inactive"))?;
                self.status = status;
                Ok(())
            }
            _ => {
                if !self.props.is_object() {
                    self.props = serde_json::json!({});
                }
                if let Some(existing) = self.props.as_object_mut() {
                    if value.is_null() {
                        existing.remove(name);
                    } else {
                        existing.insert(name.to_string(), value);
                    }
                }
                Ok(())
            }
        }
    }
}

#[allow(clippy::float_cmp)]
fn values_match(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Failure to write a shape attribute.
#[derive(Debug, thiserror::Error)]
pub enum AttrError {
    #[error("attribute {0} is read-only")]
    ReadOnly(String),
    #[error("attribute {name} expects {expected}")]
    WrongType { name: String, expected: &'static str },
}

impl AttrError {
    fn wrong_type(name: &str, expected: &'static str) -> Self {
        Self::WrongType { name: name.to_string(), expected }
    }
}

/// Which shapes a bulk operation applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Every shape.
    All,
    /// One shape by position.
    Index(usize),
    /// One shape by stable id.
    Id(ShapeId),
    /// Every shape whose attribute `name` equals `value`.
    Attr { name: String, value: Value },
}

impl Selector {
    #[must_use]
    pub fn attr(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Attr { name: name.into(), value: value.into() }
    }
}

/// Read-side filter for [`ShapeStore::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectQuery {
    All,
    Index(usize),
    Status(Status),
}

/// Ordered in-memory store of shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape, returning its index.
    ///
    /// Points are clamped into `[0, 1]`. Incomplete polygons are refused.
    pub fn push(&mut self, mut shape: Shape) -> Option<usize> {
        if !shape.geometry.is_complete() {
            tracing::warn!(id = %shape.id, kind = shape.kind().as_str(), "refusing incomplete shape");
            return None;
        }
        shape.geometry.clamp();
        self.shapes.push(shape);
        Some(self.shapes.len() - 1)
    }

    /// Replace all shapes, returning how many were kept.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) -> usize {
        self.shapes.clear();
        shapes.into_iter().filter_map(|s| self.push(s)).count()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// Current position of the shape with `id`.
    #[must_use]
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// All shapes in insertion order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// First shape whose attribute matches, with its index.
    #[must_use]
    pub fn find_attr(&self, name: &str, value: &Value) -> Option<(usize, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .find(|(_, s)| s.matches_attr(name, value))
    }

    /// Indices matched by `selector`, ascending.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Vec<usize> {
        match selector {
            Selector::All => (0..self.shapes.len()).collect(),
            Selector::Index(i) => (*i < self.shapes.len()).then_some(*i).into_iter().collect(),
            Selector::Id(id) => self.index_of(*id).into_iter().collect(),
            Selector::Attr { name, value } => self
                .shapes
                .iter()
                .enumerate()
                .filter(|(_, s)| s.matches_attr(name, value))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Shapes matching a read query.
    #[must_use]
    pub fn query(&self, query: ObjectQuery) -> Vec<&Shape> {
        match query {
            ObjectQuery::All => self.shapes.iter().collect(),
            ObjectQuery::Index(i) => self.shapes.get(i).into_iter().collect(),
            ObjectQuery::Status(status) => self.shapes.iter().filter(|s| s.status == status).collect(),
        }
    }

    /// Remove every shape matched by `selector`, returning them in order.
    ///
    /// Matches are collected first and removed afterwards so indices stay
    /// valid while scanning.
    pub fn remove_where(&mut self, selector: &Selector) -> Vec<Shape> {
        let indices = self.select(selector);
        let mut removed: Vec<Shape> = indices.iter().rev().map(|&i| self.shapes.remove(i)).collect();
        removed.reverse();
        removed
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
