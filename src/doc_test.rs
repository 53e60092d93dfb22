#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn rect(ax: f64, ay: f64, bx: f64, by: f64) -> Shape {
    Shape::rectangle(Point::new(ax, ay), Point::new(bx, by))
}

fn triangle() -> Shape {
    Shape::polygon(vec![Point::new(0.1, 0.1), Point::new(0.5, 0.1), Point::new(0.3, 0.4)])
}

// =============================================================
// Status / ShapeKind
// =============================================================

#[test]
fn status_default_is_active() {
    assert_eq!(Status::default(), Status::Active);
}

#[test]
fn status_parse_round_trips_names() {
    for status in [Status::Active, Status::Hidden, Status::Inactive] {
        assert_eq!(Status::parse(status.as_str()), Some(status));
    }
    assert_eq!(Status::parse("ACTIVE"), None);
}

#[test]
fn status_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Status::Inactive).unwrap(), "\"inactive\"");
}

#[test]
fn kind_serde_lowercase() {
    assert_eq!(serde_json::to_string(&ShapeKind::Polygon).unwrap(), "\"polygon\"");
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn rectangle_bounds_ignore_corner_order() {
    let g = rect(0.6, 0.8, 0.2, 0.1).geometry;
    let b = g.bounds(Viewport::new(100.0, 100.0)).unwrap();
    assert_eq!(b.min, Point::new(0.2, 0.1));
    assert_eq!(b.max, Point::new(0.6, 0.8));
}

#[test]
fn polygon_bounds_use_all_vertices() {
    let b = triangle().geometry.bounds(Viewport::new(10.0, 10.0)).unwrap();
    assert_eq!(b.min, Point::new(0.1, 0.1));
    assert_eq!(b.max, Point::new(0.5, 0.4));
}

#[test]
fn empty_polygon_has_no_bounds() {
    let g = Geometry::Polygon { points: vec![] };
    assert!(g.bounds(Viewport::new(10.0, 10.0)).is_none());
}

#[test]
fn circle_bounds_depend_on_viewport() {
    let g = Shape::circle(Point::new(0.5, 0.5), Radius::new(0.1, 0.0)).geometry;
    // Effective radius on 200x100 is 20px: 0.1 of width, 0.2 of height.
    let b = g.bounds(Viewport::new(200.0, 100.0)).unwrap();
    assert!((b.min.x - 0.4).abs() < 1e-12);
    assert!((b.max.x - 0.6).abs() < 1e-12);
    assert!((b.min.y - 0.3).abs() < 1e-12);
    assert!((b.max.y - 0.7).abs() < 1e-12);
}

#[test]
fn translate_moves_every_point() {
    let mut g = triangle().geometry;
    g.translate(Point::new(0.1, 0.2));
    let Geometry::Polygon { points } = g else {
        panic!("expected polygon");
    };
    assert!((points[2].x - 0.4).abs() < 1e-12);
    assert!((points[2].y - 0.6).abs() < 1e-12);
}

#[test]
fn translate_circle_moves_center_only() {
    let mut g = Geometry::Circle { center: Point::new(0.5, 0.5), radius: Radius::new(0.1, 0.1) };
    g.translate(Point::new(-0.25, 0.25));
    assert_eq!(g, Geometry::Circle { center: Point::new(0.25, 0.75), radius: Radius::new(0.1, 0.1) });
}

#[test]
fn clamp_pulls_points_into_unit_square() {
    let mut g = rect(-0.5, 0.5, 1.5, 2.0).geometry;
    g.clamp();
    assert_eq!(g, Geometry::Rectangle { points: [Point::new(0.0, 0.5), Point::new(1.0, 1.0)] });
}

#[test]
fn polygon_needs_three_points_to_be_complete() {
    assert!(triangle().geometry.is_complete());
    let two = Geometry::Polygon { points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)] };
    assert!(!two.is_complete());
}

// =============================================================
// Shape attributes
// =============================================================

#[test]
fn new_shape_uses_defaults() {
    let s = triangle();
    assert_eq!(s.status, Status::Active);
    assert_eq!(s.line_color, DEFAULT_LINE_COLOR);
    assert_eq!(s.line_width, DEFAULT_LINE_WIDTH);
    assert!(s.props.is_null());
}

#[test]
fn attr_reads_builtins() {
    let s = rect(0.0, 0.0, 1.0, 1.0).with_style("#00ff00", 3.0).with_status(Status::Hidden);
    assert_eq!(s.attr("type"), Some(json!("rectangle")));
    assert_eq!(s.attr("lineColor"), Some(json!("#00ff00")));
    assert_eq!(s.attr("line_width"), Some(json!(3.0)));
    assert_eq!(s.attr("status"), Some(json!("hidden")));
    assert_eq!(s.attr("id"), Some(json!(s.id.to_string())));
}

#[test]
fn attr_reads_props() {
    let s = triangle().with_props(json!({ "label": "roof" }));
    assert_eq!(s.attr("label"), Some(json!("roof")));
    assert_eq!(s.attr("missing"), None);
}

#[test]
fn matches_attr_compares_numbers_by_value() {
    let s = triangle().with_style("#000", 2.0);
    assert!(s.matches_attr("lineWidth", &json!(2)));
    assert!(!s.matches_attr("lineWidth", &json!(3)));
}

#[test]
fn set_attr_updates_builtins() {
    let mut s = triangle();
    s.set_attr("lineColor", json!("#123456")).unwrap();
    s.set_attr("lineWidth", json!(4)).unwrap();
    s.set_attr("status", json!("inactive")).unwrap();
    assert_eq!(s.line_color, "#123456");
    assert_eq!(s.line_width, 4.0);
    assert_eq!(s.status, Status::Inactive);
}

#[test]
fn set_attr_rejects_wrong_types() {
    let mut s = triangle();
    assert!(matches!(s.set_attr("status", json!(5)), Err(AttrError::WrongType { .. })));
    assert!(matches!(s.set_attr("status", json!("gone")), Err(AttrError::WrongType { .. })));
    assert!(matches!(s.set_attr("lineWidth", json!(-1.0)), Err(AttrError::WrongType { .. })));
    assert!(matches!(s.set_attr("lineColor", json!(1)), Err(AttrError::WrongType { .. })));
    assert_eq!(s.status, Status::Active);
}

#[test]
fn set_attr_refuses_type_and_id() {
    let mut s = triangle();
    assert!(matches!(s.set_attr("type", json!("circle")), Err(AttrError::ReadOnly(_))));
    assert!(matches!(s.set_attr("id", json!("x")), Err(AttrError::ReadOnly(_))));
}

#[test]
fn set_attr_props_insert_and_null_removes() {
    let mut s = triangle();
    s.set_attr("label", json!("door")).unwrap();
    assert_eq!(s.props, json!({ "label": "door" }));
    s.set_attr("label", serde_json::Value::Null).unwrap();
    assert_eq!(s.props, json!({}));
}

#[test]
fn shape_serde_round_trip_keeps_id() {
    let s = Shape::circle(Point::new(0.5, 0.5), Radius::new(0.1, 0.2)).with_props(json!({ "k": 1 }));
    let text = serde_json::to_string(&s).unwrap();
    let back: Shape = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s);
}

#[test]
fn shape_deserialize_assigns_missing_id() {
    let raw = json!({
        "type": "rectangle",
        "points": [{ "x": 0.1, "y": 0.1 }, { "x": 0.2, "y": 0.2 }],
        "lineColor": "#f00",
        "lineWidth": 2.0
    });
    let s: Shape = serde_json::from_value(raw).unwrap();
    assert_eq!(s.kind(), ShapeKind::Rectangle);
    assert_eq!(s.status, Status::Active);
    assert!(!s.id.is_nil());
}

// =============================================================
// ShapeStore
// =============================================================

#[test]
fn store_push_returns_index_and_clamps() {
    let mut store = ShapeStore::new();
    assert_eq!(store.push(rect(0.0, 0.0, 0.5, 0.5)), Some(0));
    assert_eq!(store.push(rect(-1.0, 0.2, 0.5, 3.0)), Some(1));
    assert_eq!(
        store.get(1).unwrap().geometry,
        Geometry::Rectangle { points: [Point::new(0.0, 0.2), Point::new(0.5, 1.0)] }
    );
}

#[test]
fn store_refuses_incomplete_polygon() {
    let mut store = ShapeStore::new();
    let two = Shape::polygon(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    assert_eq!(store.push(two), None);
    assert!(store.is_empty());
}

#[test]
fn store_replace_all_counts_kept() {
    let mut store = ShapeStore::new();
    store.push(triangle());
    let kept = store.replace_all(vec![rect(0.0, 0.0, 1.0, 1.0), Shape::polygon(vec![])]);
    assert_eq!(kept, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().kind(), ShapeKind::Rectangle);
}

#[test]
fn store_index_of_tracks_id_after_removal() {
    let mut store = ShapeStore::new();
    let a = rect(0.0, 0.0, 0.1, 0.1);
    let b = rect(0.2, 0.2, 0.3, 0.3);
    let b_id = b.id;
    store.push(a);
    store.push(b);
    assert_eq!(store.index_of(b_id), Some(1));
    store.remove_where(&Selector::Index(0));
    assert_eq!(store.index_of(b_id), Some(0));
}

#[test]
fn store_find_attr_returns_first_match() {
    let mut store = ShapeStore::new();
    store.push(triangle().with_props(json!({ "label": "x" })));
    store.push(rect(0.0, 0.0, 1.0, 1.0).with_props(json!({ "label": "y" })));
    store.push(rect(0.0, 0.0, 0.5, 0.5).with_props(json!({ "label": "y" })));
    let (index, shape) = store.find_attr("label", &json!("y")).unwrap();
    assert_eq!(index, 1);
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert!(store.find_attr("label", &json!("z")).is_none());
}

#[test]
fn store_select_variants() {
    let mut store = ShapeStore::new();
    let first = triangle();
    let first_id = first.id;
    store.push(first);
    store.push(rect(0.0, 0.0, 1.0, 1.0));
    store.push(rect(0.0, 0.0, 0.5, 0.5));
    assert_eq!(store.select(&Selector::All), vec![0, 1, 2]);
    assert_eq!(store.select(&Selector::Index(2)), vec![2]);
    assert!(store.select(&Selector::Index(3)).is_empty());
    assert_eq!(store.select(&Selector::Id(first_id)), vec![0]);
    assert_eq!(store.select(&Selector::attr("type", "rectangle")), vec![1, 2]);
}

#[test]
fn store_query_by_status() {
    let mut store = ShapeStore::new();
    store.push(triangle());
    store.push(rect(0.0, 0.0, 1.0, 1.0).with_status(Status::Hidden));
    store.push(rect(0.0, 0.0, 0.5, 0.5).with_status(Status::Hidden));
    assert_eq!(store.query(ObjectQuery::All).len(), 3);
    assert_eq!(store.query(ObjectQuery::Status(Status::Hidden)).len(), 2);
    assert_eq!(store.query(ObjectQuery::Index(0)).len(), 1);
    assert!(store.query(ObjectQuery::Index(9)).is_empty());
}

#[test]
fn store_remove_where_keeps_order_of_removed() {
    let mut store = ShapeStore::new();
    store.push(rect(0.0, 0.0, 0.1, 0.1).with_props(json!({ "tag": "a" })));
    store.push(triangle());
    store.push(rect(0.0, 0.0, 0.2, 0.2).with_props(json!({ "tag": "b" })));
    let removed = store.remove_where(&Selector::attr("type", "rectangle"));
    assert_eq!(removed.len(), 2);
    assert_eq!(removed[0].attr("tag"), Some(json!("a")));
    assert_eq!(removed[1].attr("tag"), Some(json!("b")));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().kind(), ShapeKind::Polygon);
}
