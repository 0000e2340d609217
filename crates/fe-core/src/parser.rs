//! Parser: scene text format → Scene.
//!
//! Built on `winnow` 0.7 token parsers. Records are read one per line; the
//! fields inside a record are whitespace-delimited tokens.

use crate::error::{FormatError, ShapeError};
use crate::model::{Color, DEFAULT_LINE_LENGTH, Shape, ShapeKind, ShapeParams, Vec2};
use crate::scene::Scene;
use std::str::FromStr;
use winnow::ascii::multispace0;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

/// Decode a scene file into a fresh `Scene`.
///
/// Nothing is returned unless every record decodes, so callers can swap the
/// result in without ever observing a half-loaded scene.
#[must_use = "parsing result should be used"]
pub fn decode_scene(input: &str) -> Result<Scene, FormatError> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());

    let mut header = Record::new(0, lines.next().unwrap_or_default());
    let count: usize = header.number("count")?;
    if !header.is_exhausted() {
        log::warn!("ignoring trailing fields {:?} after the record count", header.rest.trim());
    }

    let mut scene = Scene::new();
    for index in 0..count {
        let mut record = Record::new(index, lines.next().unwrap_or_default());
        let shape = parse_shape(&mut record)?;
        if !record.is_exhausted() {
            log::warn!("record {index}: ignoring trailing fields {:?}", record.rest.trim());
        }
        scene.push(shape);
    }

    let extra = lines.count();
    if extra > 0 {
        log::warn!("ignoring {extra} line(s) after {count} records");
    }
    log::debug!("decoded scene with {count} shapes");
    Ok(scene)
}

/// Cursor over the tokens of one record.
struct Record<'a> {
    index: usize,
    rest: &'a str,
}

impl<'a> Record<'a> {
    fn new(index: usize, line: &'a str) -> Self {
        Self { index, rest: line }
    }

    fn token(&mut self, field: &'static str) -> Result<&'a str, FormatError> {
        let _: Result<&str, ContextError> = multispace0.parse_next(&mut self.rest);
        take_while::<_, _, ContextError>(1.., |c: char| !c.is_whitespace())
            .parse_next(&mut self.rest)
            .map_err(|_| FormatError::UnexpectedEnd {
                record: self.index,
                field,
            })
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, FormatError> {
        let token = self.token(field)?;
        token.parse::<T>().map_err(|_| FormatError::InvalidNumber {
            record: self.index,
            field,
            token: token.to_string(),
        })
    }

    /// A finite `f32`. `NaN` and infinities parse but are rejected.
    fn real(&mut self, field: &'static str) -> Result<f32, FormatError> {
        let token = self.token(field)?;
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(self.out_of_range(field, token)),
            Err(_) => Err(FormatError::InvalidNumber {
                record: self.index,
                field,
                token: token.to_string(),
            }),
        }
    }

    fn channel(&mut self, field: &'static str) -> Result<u8, FormatError> {
        let value: u32 = self.number(field)?;
        u8::try_from(value).map_err(|_| self.out_of_range(field, value))
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, FormatError> {
        match self.number::<u32>(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.out_of_range(field, other)),
        }
    }

    fn vec2(&mut self, x: &'static str, y: &'static str) -> Result<Vec2, FormatError> {
        Ok(Vec2::new(self.real(x)?, self.real(y)?))
    }

    fn is_exhausted(&self) -> bool {
        self.rest.trim().is_empty()
    }

    fn out_of_range(&self, field: &'static str, value: impl ToString) -> FormatError {
        FormatError::OutOfRange {
            record: self.index,
            field,
            token: value.to_string(),
        }
    }

    fn shape_error(&self, err: ShapeError) -> FormatError {
        match err {
            ShapeError::OutOfRange { property, value } => self.out_of_range(property, value),
            ShapeError::Unsupported { property, .. } => self.out_of_range(property, "unsupported"),
        }
    }
}

fn parse_shape(record: &mut Record<'_>) -> Result<Shape, FormatError> {
    let tag: u32 = record.number("type")?;
    let kind = ShapeKind::from_tag(tag).ok_or(FormatError::UnknownTag {
        record: record.index,
        tag,
    })?;

    let position = record.vec2("x", "y")?;
    let rotation = record.real("rotation")?;
    let scale = record.vec2("scale_x", "scale_y")?;
    let color = Color::rgba(
        record.channel("r")?,
        record.channel("g")?,
        record.channel("b")?,
        record.channel("a")?,
    );
    let animated = record.flag("animated")?;

    let mut shape = match kind {
        ShapeKind::Circle => {
            let radius = record.real("radius")?;
            let rotation_speed = record.real("rotation_speed")?;
            let scale_speed = record.real("scale_speed")?;
            let mut shape = build(record, position, color, ShapeParams::Circle { radius })?;
            speeds(record, &mut shape, rotation_speed, Some(scale_speed))?;
            shape
        }
        ShapeKind::Rectangle => {
            let size = record.vec2("width", "height")?;
            let rotation_speed = record.real("rotation_speed")?;
            let scale_speed = record.real("scale_speed")?;
            let params = ShapeParams::Rectangle {
                width: size.x,
                height: size.y,
            };
            let mut shape = build(record, position, color, params)?;
            speeds(record, &mut shape, rotation_speed, Some(scale_speed))?;
            shape
        }
        ShapeKind::Triangle => {
            let size = record.real("size")?;
            let rotation_speed = record.real("rotation_speed")?;
            let mut shape = build(record, position, color, ShapeParams::Triangle { size })?;
            speeds(record, &mut shape, rotation_speed, None)?;
            shape
        }
        ShapeKind::Ellipse => {
            let radii = record.vec2("radius_x", "radius_y")?;
            let rotation_speed = record.real("rotation_speed")?;
            let params = ShapeParams::Ellipse {
                radius_x: radii.x,
                radius_y: radii.y,
            };
            let mut shape = build(record, position, color, params)?;
            speeds(record, &mut shape, rotation_speed, None)?;
            shape
        }
        ShapeKind::Polygon => {
            let count: usize = record.number("point_count")?;
            let mut points = Vec::new();
            for _ in 0..count {
                points.push(record.vec2("point_x", "point_y")?);
            }
            let rotation_speed = record.real("rotation_speed")?;
            let mut shape = build(record, position, color, ShapeParams::Polygon { points })?;
            speeds(record, &mut shape, rotation_speed, None)?;
            shape
        }
        ShapeKind::Line => {
            let thickness = record.real("thickness")?;
            let rotation_speed = record.real("rotation_speed")?;
            let length = if record.is_exhausted() {
                DEFAULT_LINE_LENGTH
            } else {
                record.real("length")?
            };
            let mut shape = build(record, position, color, ShapeParams::Line { length, thickness })?;
            speeds(record, &mut shape, rotation_speed, None)?;
            shape
        }
        ShapeKind::Cube => {
            let size = record.real("size")?;
            let depth = record.real("depth")?;
            let angle = record.real("angle")?;
            let mut shape = build(record, position, color, ShapeParams::Cube { size, depth })?;
            shape
                .set_cube_angle(angle)
                .map_err(|e| record.shape_error(e))?;
            shape
        }
        ShapeKind::Text => {
            let content = record.token("content")?.to_string();
            let character_size = record.number("character_size")?;
            build(
                record,
                position,
                color,
                ShapeParams::Text {
                    content,
                    character_size,
                },
            )?
        }
    };

    shape.set_rotation(rotation);
    shape.set_scale(scale);
    shape.enable_animation(animated);
    Ok(shape)
}

fn build(
    record: &Record<'_>,
    position: Vec2,
    color: Color,
    params: ShapeParams,
) -> Result<Shape, FormatError> {
    Shape::new(position, color, params).map_err(|e| record.shape_error(e))
}

fn speeds(
    record: &Record<'_>,
    shape: &mut Shape,
    rotation_speed: f32,
    scale_speed: Option<f32>,
) -> Result<(), FormatError> {
    shape
        .set_rotation_speed(rotation_speed)
        .map_err(|e| record.shape_error(e))?;
    if let Some(speed) = scale_speed {
        shape
            .set_scale_speed(speed)
            .map_err(|e| record.shape_error(e))?;
    }
    Ok(())
}
