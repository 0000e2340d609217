//! Hit testing: point → primitive lookup.
//!
//! Walks primitives in reverse draw order (last painted = topmost) and tests
//! the point against each shape's actual outline in local space.

use crate::geometry::{local_path, point, primitive_bounds, transform};
use fe_core::{PrimitiveGeometry, RenderPrimitive, Segment, Vec2};
use kurbo::{Point, Shape as _};

/// Extra reach around cube edges, in world units.
pub const EDGE_SLOP: f64 = 3.0;

/// Index of the topmost primitive at `(x, y)`, or `None` for background.
pub fn hit_test(primitives: &[RenderPrimitive], x: f32, y: f32) -> Option<usize> {
    let p = point(Vec2::new(x, y));
    primitives.iter().rposition(|prim| contains(prim, p))
}

/// Whether `p` (world space) lies on `prim`.
pub fn contains(prim: &RenderPrimitive, p: Point) -> bool {
    match &prim.geometry {
        PrimitiveGeometry::Edges { segments } => {
            primitive_bounds(prim).inflate(EDGE_SLOP, EDGE_SLOP).contains(p)
                && segments.iter().any(|s| near_segment(s, p))
        }
        geometry => {
            let affine = transform(prim);
            if affine.determinant().abs() < f64::EPSILON {
                return false;
            }
            match local_path(geometry) {
                Some(path) => path.contains(affine.inverse() * p),
                None => false,
            }
        }
    }
}

fn near_segment(s: &Segment, p: Point) -> bool {
    let line = kurbo::Line::new(point(s.start), point(s.end));
    let nearest = kurbo::ParamCurveNearest::nearest(&line, p, 1e-6);
    nearest.distance_sq <= EDGE_SLOP * EDGE_SLOP
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::{Color, Shape, ShapeKind};
    use pretty_assertions::assert_eq;

    fn primitives(shapes: &[Shape]) -> Vec<RenderPrimitive> {
        shapes.iter().map(RenderPrimitive::from_shape).collect()
    }

    #[test]
    fn hit_test_basic() {
        let prims = primitives(&[
            Shape::with_defaults(ShapeKind::Rectangle, Vec2::new(100.0, 100.0), Color::BLUE),
            Shape::with_defaults(ShapeKind::Circle, Vec2::new(400.0, 300.0), Color::GREEN),
        ]);
        assert_eq!(hit_test(&prims, 100.0, 100.0), Some(0));
        assert_eq!(hit_test(&prims, 140.0, 120.0), Some(0));
        assert_eq!(hit_test(&prims, 420.0, 300.0), Some(1));
        assert_eq!(hit_test(&prims, 799.0, 599.0), None);
    }

    #[test]
    fn topmost_wins_on_overlap() {
        let prims = primitives(&[
            Shape::with_defaults(ShapeKind::Rectangle, Vec2::new(100.0, 100.0), Color::BLUE),
            Shape::with_defaults(ShapeKind::Ellipse, Vec2::new(110.0, 100.0), Color::RED),
        ]);
        assert_eq!(hit_test(&prims, 105.0, 100.0), Some(1));
        // Inside the rectangle, outside the ellipse.
        assert_eq!(hit_test(&prims, 55.0, 75.0), Some(0));
    }

    #[test]
    fn circle_corner_misses() {
        let prims = primitives(&[Shape::with_defaults(
            ShapeKind::Circle,
            Vec2::new(0.0, 0.0),
            Color::GREEN,
        )]);
        // Inside the bounding box but outside the circle.
        assert_eq!(hit_test(&prims, 45.0, 45.0), None);
        assert_eq!(hit_test(&prims, 30.0, 30.0), Some(0));
    }

    #[test]
    fn rotated_line_follows_direction() {
        let line = Shape::line(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0), Color::YELLOW, 4.0).unwrap();
        let prims = primitives(&[line]);
        assert_eq!(hit_test(&prims, 50.0, 50.0), Some(0));
        assert_eq!(hit_test(&prims, 90.0, 90.0), Some(0));
        assert_eq!(hit_test(&prims, 90.0, 10.0), None);
    }

    #[test]
    fn cube_is_hit_on_edges_only() {
        let prims = primitives(&[Shape::with_defaults(
            ShapeKind::Cube,
            Vec2::new(200.0, 200.0),
            Color::MAGENTA,
        )]);
        // Front face top edge runs from (150,150) to (250,150).
        assert_eq!(hit_test(&prims, 200.0, 151.0), Some(0));
        // Between edges, inside the bounding box.
        assert_eq!(hit_test(&prims, 230.0, 170.0), None);
    }

    #[test]
    fn zero_scale_is_never_hit() {
        let mut shape = Shape::with_defaults(ShapeKind::Rectangle, Vec2::new(10.0, 10.0), Color::BLUE);
        shape.set_scale(Vec2::new(0.0, 1.0));
        assert_eq!(hit_test(&primitives(&[shape]), 10.0, 10.0), None);
    }
}
