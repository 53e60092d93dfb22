#![allow(clippy::float_cmp)]

use super::*;
use crate::coords::Radius;
use crate::doc::ShapeStore;
use crate::surface::{DrawCommand, RecordingSurface};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

// =============================================================
// draw_shape
// =============================================================

#[test]
fn rectangle_paints_closed_four_corner_path_in_pixels() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    let shape = Shape::rectangle(pt(0.5, 0.8), pt(0.1, 0.2)).with_style("#00f", 4.0);
    draw_shape(&mut surface, &shape, false).expect("draw");

    let [DrawCommand::Path { points, closed, stroke }] = surface.commands() else {
        panic!("expected one path, got {:?}", surface.commands());
    };
    assert!(*closed);
    assert_eq!(stroke, &Stroke::solid("#00f", 4.0));
    let expected = [pt(20.0, 20.0), pt(100.0, 20.0), pt(100.0, 80.0), pt(20.0, 80.0)];
    assert_eq!(points.len(), 4);
    for (got, want) in points.iter().zip(expected) {
        assert!(approx(*got, want), "{got:?} != {want:?}");
    }
}

#[test]
fn polygon_closes_unless_open() {
    let shape = Shape::polygon(vec![pt(0.1, 0.1), pt(0.5, 0.1), pt(0.3, 0.4)]);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    draw_shape(&mut surface, &shape, false).expect("draw");
    assert!(matches!(&surface.commands()[0], DrawCommand::Path { closed: true, .. }));

    let mut surface = RecordingSurface::new(100.0, 100.0);
    draw_shape(&mut surface, &shape, true).expect("draw");
    assert!(matches!(&surface.commands()[0], DrawCommand::Path { closed: false, .. }));
}

#[test]
fn circle_uses_effective_pixel_radius() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    let shape = Shape::circle(pt(0.5, 0.5), Radius::new(0.15, 0.4));
    draw_shape(&mut surface, &shape, false).expect("draw");

    let [DrawCommand::Circle { center, radius, .. }] = surface.commands() else {
        panic!("expected one circle");
    };
    assert!(approx(*center, pt(100.0, 50.0)));
    // hypot(30, 40)
    assert!((radius - 50.0).abs() < 1e-9);
}

#[test]
fn hidden_shape_paints_nothing() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let shape = Shape::rectangle(pt(0.1, 0.1), pt(0.2, 0.2)).with_status(Status::Hidden);
    draw_shape(&mut surface, &shape, false).expect("draw");
    assert!(surface.is_blank());
}

#[test]
fn inactive_shape_paints_at_half_width() {
    let shape = Shape::rectangle(pt(0.1, 0.1), pt(0.2, 0.2))
        .with_style("#000", 6.0)
        .with_status(Status::Inactive);
    assert_eq!(shape_stroke(&shape).width, 3.0);
}

// =============================================================
// redraw_all
// =============================================================

#[test]
fn redraw_all_clears_then_paints_visible_shapes_in_order() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let shapes = vec![
        Shape::rectangle(pt(0.1, 0.1), pt(0.2, 0.2)),
        Shape::circle(pt(0.5, 0.5), Radius::new(0.1, 0.0)).with_status(Status::Hidden),
        Shape::polygon(vec![pt(0.1, 0.1), pt(0.5, 0.1), pt(0.3, 0.4)]),
    ];
    draw_shape(&mut surface, &shapes[0], false).expect("draw");
    redraw_all(&mut surface, &shapes).expect("redraw");

    assert_eq!(surface.clear_count(), 1);
    assert_eq!(surface.commands().len(), 2);
    assert!(matches!(&surface.commands()[0], DrawCommand::Path { points, .. } if points.len() == 4));
    assert!(matches!(&surface.commands()[1], DrawCommand::Path { points, .. } if points.len() == 3));
}

#[test]
fn redraw_does_not_alter_stored_shapes() {
    let mut store = ShapeStore::new();
    store.push(Shape::rectangle(pt(0.1, 0.1), pt(0.4, 0.4)));
    store.push(Shape::polygon(vec![pt(0.1, 0.1), pt(0.5, 0.1), pt(0.3, 0.4)]));
    store.push(Shape::circle(pt(0.5, 0.5), Radius::new(0.1, 0.1)));
    let before = store.shapes().to_vec();

    let mut surface = RecordingSurface::new(640.0, 480.0);
    redraw_all(&mut surface, store.shapes()).expect("redraw");

    assert_eq!(store.shapes(), before.as_slice());
}

#[test]
fn same_relative_geometry_scales_with_surface() {
    let shape = Shape::rectangle(pt(0.25, 0.25), pt(0.75, 0.5));

    let mut small = RecordingSurface::new(100.0, 100.0);
    let mut large = RecordingSurface::new(400.0, 200.0);
    draw_shape(&mut small, &shape, false).expect("draw");
    draw_shape(&mut large, &shape, false).expect("draw");

    let (DrawCommand::Path { points: a, .. }, DrawCommand::Path { points: b, .. }) =
        (&small.commands()[0], &large.commands()[0])
    else {
        panic!("expected paths");
    };
    for (p, q) in a.iter().zip(b) {
        assert!(approx(pt(p.x / 100.0, p.y / 100.0), pt(q.x / 400.0, q.y / 200.0)));
    }
}

// =============================================================
// Overlays
// =============================================================

#[test]
fn highlight_uses_config_style() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let config = EngineConfig::default();
    let shape = Shape::rectangle(pt(0.1, 0.1), pt(0.2, 0.2)).with_style("#000", 1.0);
    draw_highlight(&mut surface, &shape, &config).expect("highlight");

    let [DrawCommand::Path { stroke, .. }] = surface.commands() else {
        panic!("expected one path");
    };
    assert_eq!(stroke, &Stroke::solid(config.highlight_color.clone(), config.highlight_width));
}

#[test]
fn preview_is_dashed_and_open() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let config = EngineConfig::default();
    let draft = Geometry::Polygon { points: vec![pt(0.1, 0.1), pt(0.5, 0.5)] };
    draw_preview(&mut surface, &draft, "#f00", 2.0, &config).expect("preview");

    let [DrawCommand::Path { closed, stroke, .. }] = surface.commands() else {
        panic!("expected one path");
    };
    assert!(!closed);
    assert_eq!(stroke.dash, Some(config.preview_dash_px));
}

#[test]
fn edit_overlay_fills_mover_then_handles() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let config = EngineConfig::default();
    let overlay = EditOverlay {
        mover: Bounds::from_corners(pt(10.0, 10.0), pt(40.0, 40.0)),
        handles: vec![pt(10.0, 10.0), pt(40.0, 40.0)],
    };
    draw_edit_overlay(&mut surface, &overlay, &config).expect("overlay");

    let cmds = surface.commands();
    assert_eq!(cmds.len(), 5);
    assert!(matches!(&cmds[0], DrawCommand::FillRect { color, .. } if *color == config.mover_fill));
    let DrawCommand::FillRect { rect, color } = &cmds[1] else {
        panic!("expected handle fill");
    };
    assert_eq!(color, &config.handle_fill);
    assert!((rect.width() - 2.0 * config.handle_radius_px).abs() < 1e-9);
}
