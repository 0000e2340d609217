//! Render-primitive description.
//!
//! A renderer draws each primitive by mapping local geometry through
//! `translate(position) · rotate(rotation) · scale(scale) · translate(-origin)`.
//! Local geometry uses a top-left frame: a circle of radius `r` spans
//! `(0,0)..(2r,2r)` and pivots on `origin = (r,r)`.
//!
//! Nothing in this module depends on a rendering backend.

use crate::model::{Color, Geometry, Segment, Shape, ShapeKind, Vec2};
use crate::transform::rotate_point;
use serde::{Deserialize, Serialize};

/// Selection outline width.
pub const OUTLINE_THICKNESS: f32 = 3.0;
pub const OUTLINE_COLOR: Color = Color::YELLOW;
/// Stroke width for cube edges.
pub const EDGE_THICKNESS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub thickness: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveGeometry {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
    Ellipse { radius_x: f32, radius_y: f32 },
    /// Closed outline; triangles are drawn this way too.
    Polygon { points: Vec<Vec2> },
    /// A bar `length` long and `thickness` wide.
    Line { length: f32, thickness: f32 },
    /// World-space segments; the transform fields do not apply.
    Edges { segments: Vec<Segment> },
    Text { content: String, character_size: u32 },
}

/// Everything a renderer needs to draw one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPrimitive {
    pub kind: ShapeKind,
    pub geometry: PrimitiveGeometry,
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
    /// Transparent while a text shape is blinked out.
    pub fill: Color,
    pub outline: Option<Outline>,
}

impl RenderPrimitive {
    pub fn from_shape(shape: &Shape) -> Self {
        let (geometry, origin) = match shape.geometry() {
            Geometry::Circle { radius, .. } => (
                PrimitiveGeometry::Circle { radius: *radius },
                Vec2::new(*radius, *radius),
            ),
            Geometry::Rectangle { width, height, .. } => (
                PrimitiveGeometry::Rect {
                    width: *width,
                    height: *height,
                },
                Vec2::new(width / 2.0, height / 2.0),
            ),
            Geometry::Triangle { size, .. } => {
                let s = *size;
                (
                    PrimitiveGeometry::Polygon {
                        points: vec![Vec2::new(0.0, s), Vec2::new(s / 2.0, 0.0), Vec2::new(s, s)],
                    },
                    Vec2::new(s / 2.0, s / 2.0),
                )
            }
            Geometry::Ellipse {
                radius_x, radius_y, ..
            } => (
                PrimitiveGeometry::Ellipse {
                    radius_x: *radius_x,
                    radius_y: *radius_y,
                },
                Vec2::new(*radius_x, *radius_y),
            ),
            Geometry::Polygon { points, origin, .. } => (
                PrimitiveGeometry::Polygon {
                    points: points.to_vec(),
                },
                *origin,
            ),
            Geometry::Line {
                length, thickness, ..
            } => (
                PrimitiveGeometry::Line {
                    length: *length,
                    thickness: *thickness,
                },
                Vec2::new(length / 2.0, thickness / 2.0),
            ),
            Geometry::Cube { edges, .. } => (
                PrimitiveGeometry::Edges {
                    segments: edges.to_vec(),
                },
                Vec2::ZERO,
            ),
            Geometry::Text {
                content,
                character_size,
                ..
            } => (
                PrimitiveGeometry::Text {
                    content: content.clone(),
                    character_size: *character_size,
                },
                Vec2::ZERO,
            ),
        };

        Self {
            kind: shape.kind(),
            geometry,
            position: shape.position(),
            rotation: shape.rotation(),
            scale: shape.display_scale(),
            origin,
            fill: if shape.is_visible() {
                shape.color()
            } else {
                Color::TRANSPARENT
            },
            outline: shape.is_selected().then_some(Outline {
                thickness: OUTLINE_THICKNESS,
                color: OUTLINE_COLOR,
            }),
        }
    }

    /// Map a point from local geometry space to world space.
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        let scaled = local - self.origin;
        let scaled = Vec2::new(scaled.x * self.scale.x, scaled.y * self.scale.y);
        rotate_point(scaled, self.rotation) + self.position
    }

    /// World-space endpoints of a line primitive.
    pub fn line_endpoints(&self) -> Option<(Vec2, Vec2)> {
        match self.geometry {
            PrimitiveGeometry::Line { length, thickness } => {
                let mid = thickness / 2.0;
                Some((
                    self.to_world(Vec2::new(0.0, mid)),
                    self.to_world(Vec2::new(length, mid)),
                ))
            }
            _ => None,
        }
    }
}
