//! Render primitives → Vello drawing commands.
//!
//! Fills each primitive with its color, strokes cube edges, and strokes the
//! selection outline on top.

use crate::geometry::{local_path, point, text_box, transform};
use fe_core::primitive::EDGE_THICKNESS;
use fe_core::{Color as ShapeColor, Outline, PrimitiveGeometry, RenderPrimitive, Segment};
use kurbo::{Affine, Line, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Paint every primitive, in order, to a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`.
/// The caller presents the scene.
pub fn paint_scene(scene: &mut Scene, primitives: &[RenderPrimitive]) {
    for prim in primitives {
        paint_primitive(scene, prim);
    }
}

pub fn paint_primitive(scene: &mut Scene, prim: &RenderPrimitive) {
    match &prim.geometry {
        PrimitiveGeometry::Edges { segments } => paint_edges(scene, segments, prim),
        PrimitiveGeometry::Text {
            content,
            character_size,
        } => {
            log::trace!(
                "TEXT {:?} size {} at ({}, {})",
                content,
                character_size,
                prim.position.x,
                prim.position.y
            );
            // Glyph shaping needs a font context; only the selection box is drawn.
            if let Some(outline) = &prim.outline {
                let affine = transform(prim);
                stroke_outline(scene, affine, &text_box(content, *character_size), outline);
            }
        }
        geometry => {
            let Some(path) = local_path(geometry) else {
                return;
            };
            let affine = transform(prim);
            log::trace!("{} at ({}, {})", prim.kind, prim.position.x, prim.position.y);
            if prim.fill.a > 0 {
                scene.fill(Fill::NonZero, affine, to_color(prim.fill), None, &path);
            }
            if let Some(outline) = &prim.outline {
                stroke_outline(scene, affine, &path, outline);
            }
        }
    }
}

// ─── Painters ────────────────────────────────────────────────────────────────

fn paint_edges(scene: &mut Scene, segments: &[Segment], prim: &RenderPrimitive) {
    log::trace!("{} with {} edges", prim.kind, segments.len());
    if let Some(outline) = &prim.outline {
        let stroke = Stroke::new(outline.thickness as f64);
        for s in segments {
            scene.stroke(&stroke, Affine::IDENTITY, to_color(outline.color), None, &segment_line(s));
        }
    }
    if prim.fill.a == 0 {
        return;
    }
    let stroke = Stroke::new(EDGE_THICKNESS as f64);
    for s in segments {
        scene.stroke(&stroke, Affine::IDENTITY, to_color(prim.fill), None, &segment_line(s));
    }
}

fn stroke_outline(scene: &mut Scene, affine: Affine, shape: &impl kurbo::Shape, outline: &Outline) {
    let stroke = Stroke::new(outline.thickness as f64);
    scene.stroke(&stroke, affine, to_color(outline.color), None, shape);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn segment_line(s: &Segment) -> Line {
    Line::new(point(s.start), point(s.end))
}

fn to_color(c: ShapeColor) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe_core::{Shape, ShapeKind, Vec2};

    #[test]
    fn paints_every_kind_without_panicking() {
        let mut shapes: Vec<Shape> = ShapeKind::ALL
            .iter()
            .map(|k| Shape::with_defaults(*k, Vec2::new(100.0, 100.0), ShapeColor::GREEN))
            .collect();
        for s in &mut shapes {
            s.select();
        }
        let primitives: Vec<RenderPrimitive> = shapes.iter().map(RenderPrimitive::from_shape).collect();

        let mut scene = Scene::new();
        paint_scene(&mut scene, &primitives);
    }
}
