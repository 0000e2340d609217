//! Emitter: Scene → scene text format.
//!
//! ```text
//! <count>
//! <tag> <x> <y> <rotation> <scale_x> <scale_y> <r> <g> <b> <a> <animated> <variant fields...>
//! ```
//!
//! One record per line. Numbers use the shortest representation that parses
//! back to the same value, so a decode of the output is exact.

use crate::error::FormatError;
use crate::model::{Geometry, Shape};
use crate::scene::Scene;
use std::fmt::Write;

/// Encode a whole scene.
///
/// Fails only for text content the whitespace-delimited format cannot hold
/// (empty, or containing whitespace).
#[must_use = "encoding result should be used"]
pub fn encode_scene(scene: &Scene) -> Result<String, FormatError> {
    let mut out = String::with_capacity(64 + scene.len() * 64);
    let _ = writeln!(out, "{}", scene.len());
    for (index, shape) in scene.iter().enumerate() {
        emit_shape(&mut out, index, shape)?;
        out.push('\n');
    }
    Ok(out)
}

fn emit_shape(out: &mut String, record: usize, shape: &Shape) -> Result<(), FormatError> {
    let position = shape.position();
    let scale = shape.scale();
    let color = shape.color();
    let _ = write!(
        out,
        "{} {} {} {} {} {} {} {} {} {} {}",
        shape.kind().tag(),
        position.x,
        position.y,
        shape.rotation(),
        scale.x,
        scale.y,
        color.r,
        color.g,
        color.b,
        color.a,
        u8::from(shape.is_animated()),
    );

    match shape.geometry() {
        Geometry::Circle {
            radius,
            rotation_speed,
            scale_speed,
            ..
        } => {
            let _ = write!(out, " {radius} {rotation_speed} {scale_speed}");
        }
        Geometry::Rectangle {
            width,
            height,
            rotation_speed,
            scale_speed,
            ..
        } => {
            let _ = write!(out, " {width} {height} {rotation_speed} {scale_speed}");
        }
        Geometry::Triangle {
            size,
            rotation_speed,
        } => {
            let _ = write!(out, " {size} {rotation_speed}");
        }
        Geometry::Ellipse {
            radius_x,
            radius_y,
            rotation_speed,
        } => {
            let _ = write!(out, " {radius_x} {radius_y} {rotation_speed}");
        }
        Geometry::Polygon {
            points,
            rotation_speed,
            ..
        } => {
            let _ = write!(out, " {}", points.len());
            for p in points {
                let _ = write!(out, " {} {}", p.x, p.y);
            }
            let _ = write!(out, " {rotation_speed}");
        }
        Geometry::Line {
            length,
            thickness,
            rotation_speed,
        } => {
            // Length trails so files without it still decode.
            let _ = write!(out, " {thickness} {rotation_speed} {length}");
        }
        Geometry::Cube {
            size, depth, angle, ..
        } => {
            let _ = write!(out, " {size} {depth} {angle}");
        }
        Geometry::Text {
            content,
            character_size,
            ..
        } => {
            if content.is_empty() || content.chars().any(char::is_whitespace) {
                return Err(FormatError::UnencodableText {
                    record,
                    content: content.clone(),
                });
            }
            let _ = write!(out, " {content} {character_size}");
        }
    }
    Ok(())
}
