//! Angle wrapping and the small amount of 2D geometry the model needs:
//! pseudo-3D cube edges and the polygon origin.

use crate::model::{Segment, Vec2};

/// Wrap an angle in degrees into [0, 360). Non-finite input maps to 0.
pub fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate `point` about the origin by `degrees`.
pub fn rotate_point(point: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

/// The twelve local-space edges of a pseudo-3D cube: a front square of side
/// `size` centered on the origin, a back square offset diagonally by `depth`,
/// and four edges connecting matching corners.
pub fn cube_local_edges(size: f32, depth: f32) -> [Segment; 12] {
    let h = size / 2.0;
    let offset = Vec2::new(depth, depth);
    let front = [
        Vec2::new(-h, -h),
        Vec2::new(h, -h),
        Vec2::new(h, h),
        Vec2::new(-h, h),
    ];
    let back = front.map(|p| p + offset);

    let mut edges = [Segment::default(); 12];
    for i in 0..4 {
        let j = (i + 1) % 4;
        edges[i] = Segment::new(front[i], front[j]);
        edges[i + 4] = Segment::new(back[i], back[j]);
        edges[i + 8] = Segment::new(front[i], back[i]);
    }
    edges
}

/// Rotate local edges by `angle` and translate them to `position`.
pub fn place_edges(local: &[Segment; 12], position: Vec2, angle: f32) -> [Segment; 12] {
    local.map(|s| {
        Segment::new(
            rotate_point(s.start, angle) + position,
            rotate_point(s.end, angle) + position,
        )
    })
}

/// Re-derive world-space edges in place: undo the old placement, then apply
/// the new one.
pub fn retransform_edges(
    edges: &mut [Segment; 12],
    old_position: Vec2,
    old_angle: f32,
    new_position: Vec2,
    new_angle: f32,
) {
    let replace = |p: Vec2| rotate_point(rotate_point(p - old_position, -old_angle), new_angle) + new_position;
    for edge in edges.iter_mut() {
        edge.start = replace(edge.start);
        edge.end = replace(edge.end);
    }
}

/// Half the extents of the axis-aligned bounding box of `points`.
///
/// This is not the bounding-box center: an outline that does not touch the
/// axes rotates about a point offset from its middle. Renderers rely on
/// exactly this value.
pub fn polygon_origin(points: &[Vec2]) -> Vec2 {
    let Some(first) = points.first() else {
        return Vec2::ZERO;
    };
    let (mut min, mut max) = (*first, *first);
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (max - min) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec2, b: Vec2, eps: f32) -> bool {
        (a - b).length() < eps
    }

    #[test]
    fn wrap_examples() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(450.0), 90.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(-1e-7), 0.0);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        assert_eq!(wrap_degrees(f32::INFINITY), 0.0);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = rotate_point(Vec2::new(1.0, 0.0), 90.0);
        assert!(close(p, Vec2::new(0.0, 1.0), 1e-6));
    }

    #[test]
    fn cube_edges_layout() {
        let edges = cube_local_edges(100.0, 50.0);
        assert_eq!(edges[0], Segment::new(Vec2::new(-50.0, -50.0), Vec2::new(50.0, -50.0)));
        assert_eq!(edges[4], Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)));
        assert_eq!(edges[8], Segment::new(Vec2::new(-50.0, -50.0), Vec2::new(0.0, 0.0)));
        assert_eq!(edges[11].end, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn retransform_matches_direct_placement() {
        let local = cube_local_edges(80.0, 30.0);
        let mut edges = place_edges(&local, Vec2::new(10.0, 20.0), 30.0);
        retransform_edges(&mut edges, Vec2::new(10.0, 20.0), 30.0, Vec2::new(-5.0, 7.0), 75.0);
        let direct = place_edges(&local, Vec2::new(-5.0, 7.0), 75.0);
        for (a, b) in edges.iter().zip(direct.iter()) {
            assert!(close(a.start, b.start, 1e-3));
            assert!(close(a.end, b.end, 1e-3));
        }
    }

    #[test]
    fn polygon_origin_half_extents() {
        assert_eq!(polygon_origin(&[]), Vec2::ZERO);
        assert_eq!(polygon_origin(&[Vec2::new(3.0, 4.0)]), Vec2::ZERO);
        assert_eq!(
            polygon_origin(&[Vec2::new(10.0, 0.0), Vec2::new(50.0, 30.0), Vec2::new(20.0, 10.0)]),
            Vec2::new(20.0, 15.0)
        );
    }

    proptest! {
        #[test]
        fn wrap_is_always_in_range(deg in -1.0e6f32..1.0e6f32) {
            let w = wrap_degrees(deg);
            prop_assert!((0.0..360.0).contains(&w), "{deg} wrapped to {w}");
        }
    }
}
