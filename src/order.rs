//! Containment-aware traversal order for hit-testing.
//!
//! Detection walks shapes in this order and keeps the *last* match, so a
//! rectangle nested inside another must come after its container. Only
//! rectangle pairs are compared. Polygons and circles keep their exact
//! traversal slot; rectangles are reordered among the slots rectangles
//! occupy.
//!
//! A polygon can still change places with a rectangle when that rectangle
//! has to follow a container stored after the polygon: for `[small, polygon,
//! big]` the traversal is `[big, polygon, small]`, so `small` now wins over
//! the polygon where both match. No order can keep both the nesting and
//! every rectangle/polygon pair as inserted, and nesting wins.
//!
//! Containment is a partial order, so the rectangle order is a stable
//! topological sort (Kahn's algorithm, ready set drained lowest original
//! index first) rather than a comparator sort.

#[cfg(test)]
#[path = "order_test.rs"]
mod order_test;

use std::collections::BTreeSet;

use crate::coords::Bounds;
use crate::doc::{Geometry, Shape};

/// A shape in traversal order, tagged with its position in the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ordered<'a> {
    pub original_index: usize,
    pub shape: &'a Shape,
}

/// Compute the traversal order for `shapes`.
#[must_use]
pub fn order(shapes: &[Shape]) -> Vec<Ordered<'_>> {
    let boxes: Vec<Option<Bounds>> = shapes.iter().map(rectangle_box).collect();
    let mut rectangles = nesting_order(&boxes).into_iter();
    (0..shapes.len())
        .filter_map(|slot| {
            let index = if boxes[slot].is_some() { rectangles.next()? } else { slot };
            Some(Ordered { original_index: index, shape: &shapes[index] })
        })
        .collect()
}

/// Rectangle indices with every container ahead of what it contains.
fn nesting_order(boxes: &[Option<Bounds>]) -> Vec<usize> {
    let n = boxes.len();
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut pending = vec![0usize; n];
    for outer in 0..n {
        for inner in 0..n {
            if outer != inner && strictly_contains(boxes[outer], boxes[inner]) {
                successors[outer].push(inner);
                pending[inner] += 1;
            }
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| boxes[i].is_some() && pending[i] == 0).collect();
    let mut out = Vec::with_capacity(n);
    while let Some(i) = ready.pop_first() {
        out.push(i);
        for &next in &successors[i] {
            pending[next] -= 1;
            if pending[next] == 0 {
                ready.insert(next);
            }
        }
    }
    out
}

fn rectangle_box(shape: &Shape) -> Option<Bounds> {
    match &shape.geometry {
        Geometry::Rectangle { points } => Some(Bounds::from_corners(points[0], points[1])),
        Geometry::Polygon { .. } | Geometry::Circle { .. } => None,
    }
}

/// Identical boxes contain each other; neither is forced after the other.
fn strictly_contains(outer: Option<Bounds>, inner: Option<Bounds>) -> bool {
    match (outer, inner) {
        (Some(o), Some(i)) => o != i && o.contains(&i),
        _ => false,
    }
}
