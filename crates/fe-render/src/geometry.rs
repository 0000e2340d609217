//! Render primitive → kurbo geometry.

use fe_core::{PrimitiveGeometry, RenderPrimitive, Vec2};
use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, Shape as _};

/// Flattening tolerance for curves, in local units.
pub const TOLERANCE: f64 = 0.1;

/// Horizontal advance per character, as a fraction of the character size.
/// Glyphs are not shaped here, so text extents use a fixed advance.
pub const TEXT_ADVANCE: f64 = 0.6;

pub fn point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

/// Local → world transform: `translate(position) · rotate · scale · translate(-origin)`.
pub fn transform(prim: &RenderPrimitive) -> Affine {
    Affine::translate((prim.position.x as f64, prim.position.y as f64))
        * Affine::rotate((prim.rotation as f64).to_radians())
        * Affine::scale_non_uniform(prim.scale.x as f64, prim.scale.y as f64)
        * Affine::translate((-prim.origin.x as f64, -prim.origin.y as f64))
}

/// Approximate text box in local space.
pub fn text_box(content: &str, character_size: u32) -> Rect {
    let size = character_size as f64;
    Rect::new(0.0, 0.0, content.chars().count() as f64 * size * TEXT_ADVANCE, size)
}

pub fn polygon_path(points: &[Vec2]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(point(*first));
        for p in iter {
            path.line_to(point(*p));
        }
        path.close_path();
    }
    path
}

/// Outline of a primitive in local space. `None` for cube edges, which are
/// already in world space.
pub fn local_path(geometry: &PrimitiveGeometry) -> Option<BezPath> {
    let path = match geometry {
        PrimitiveGeometry::Circle { radius } => {
            let r = *radius as f64;
            Circle::new((r, r), r).to_path(TOLERANCE)
        }
        PrimitiveGeometry::Rect { width, height } => {
            Rect::new(0.0, 0.0, *width as f64, *height as f64).to_path(TOLERANCE)
        }
        PrimitiveGeometry::Ellipse { radius_x, radius_y } => {
            let (rx, ry) = (*radius_x as f64, *radius_y as f64);
            Ellipse::new((rx, ry), (rx, ry), 0.0).to_path(TOLERANCE)
        }
        PrimitiveGeometry::Polygon { points } => polygon_path(points),
        PrimitiveGeometry::Line { length, thickness } => {
            Rect::new(0.0, 0.0, *length as f64, *thickness as f64).to_path(TOLERANCE)
        }
        PrimitiveGeometry::Text {
            content,
            character_size,
        } => text_box(content, *character_size).to_path(TOLERANCE),
        PrimitiveGeometry::Edges { .. } => return None,
    };
    Some(path)
}

/// World-space bounding box of a primitive.
pub fn primitive_bounds(prim: &RenderPrimitive) -> Rect {
    match &prim.geometry {
        PrimitiveGeometry::Edges { segments } => segments
            .iter()
            .flat_map(|s| [point(s.start), point(s.end)])
            .fold(None, |acc: Option<Rect>, p| {
                Some(match acc {
                    Some(r) => r.union_pt(p),
                    None => Rect::from_points(p, p),
                })
            })
            .unwrap_or(Rect::ZERO),
        geometry => match local_path(geometry) {
            Some(path) => (transform(prim) * path).bounding_box(),
            None => Rect::ZERO,
        },
    }
}
