//! Shape variant model.
//!
//! A `Shape` is a closed tagged variant: the common transform/color/animation
//! state lives on the struct, the per-variant state lives in `Geometry`.
//! The kind of a shape is derived from its geometry, so the type tag can never
//! disagree with the fields it describes.
//!
//! Every setter updates the logical attribute and whatever the renderer reads
//! from it in the same call (`display_scale`, cube edges, polygon origin).

use crate::error::ShapeError;
use crate::transform::{cube_local_edges, place_edges, polygon_origin, wrap_degrees};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

// ─── Points ──────────────────────────────────────────────────────────────

/// 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

// ─── Kinds ───────────────────────────────────────────────────────────────

/// The eight supported shape kinds. The discriminant is the scene file tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle = 0,
    Rectangle = 1,
    Triangle = 2,
    Ellipse = 3,
    Polygon = 4,
    Line = 5,
    Cube = 6,
    Text = 7,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
        ShapeKind::Line,
        ShapeKind::Cube,
        ShapeKind::Text,
    ];

    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.get(tag as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Line => "Line",
            ShapeKind::Cube => "Cube",
            ShapeKind::Text => "Text",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

pub type PointList = SmallVec<[Vec2; 8]>;

/// Per-variant state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Circle {
        radius: f32,
        /// Degrees per second.
        rotation_speed: f32,
        scale_speed: f32,
        pulse_time: f32,
    },
    Rectangle {
        width: f32,
        height: f32,
        rotation_speed: f32,
        scale_speed: f32,
        pulse_time: f32,
    },
    Triangle {
        size: f32,
        rotation_speed: f32,
    },
    Ellipse {
        radius_x: f32,
        radius_y: f32,
        rotation_speed: f32,
    },
    Polygon {
        /// Local-space outline.
        points: PointList,
        /// Half the extents of the local bounding box.
        origin: Vec2,
        rotation_speed: f32,
    },
    Line {
        length: f32,
        thickness: f32,
        rotation_speed: f32,
    },
    Cube {
        size: f32,
        depth: f32,
        /// Accumulated rotation in degrees, in [0, 360).
        angle: f32,
        /// World-space edges, re-derived on every rotate or move.
        edges: [Segment; 12],
    },
    Text {
        content: String,
        character_size: u32,
        blink_interval: f32,
        blink_timer: f32,
        visible: bool,
    },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Rectangle { .. } => ShapeKind::Rectangle,
            Geometry::Triangle { .. } => ShapeKind::Triangle,
            Geometry::Ellipse { .. } => ShapeKind::Ellipse,
            Geometry::Polygon { .. } => ShapeKind::Polygon,
            Geometry::Line { .. } => ShapeKind::Line,
            Geometry::Cube { .. } => ShapeKind::Cube,
            Geometry::Text { .. } => ShapeKind::Text,
        }
    }
}

// ─── Creation parameters ─────────────────────────────────────────────────

pub const DEFAULT_BLINK_INTERVAL: f32 = 0.5;
pub const DEFAULT_CHARACTER_SIZE: u32 = 24;
pub const DEFAULT_LINE_LENGTH: f32 = 100.0;

/// Variant-specific creation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeParams {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
    Triangle { size: f32 },
    Ellipse { radius_x: f32, radius_y: f32 },
    Polygon { points: Vec<Vec2> },
    /// Centered on the shape position, initially horizontal.
    Line { length: f32, thickness: f32 },
    Cube { size: f32, depth: f32 },
    Text { content: String, character_size: u32 },
}

impl ShapeParams {
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => ShapeParams::Circle { radius: 50.0 },
            ShapeKind::Rectangle => ShapeParams::Rectangle {
                width: 100.0,
                height: 60.0,
            },
            ShapeKind::Triangle => ShapeParams::Triangle { size: 100.0 },
            ShapeKind::Ellipse => ShapeParams::Ellipse {
                radius_x: 60.0,
                radius_y: 40.0,
            },
            ShapeKind::Polygon => ShapeParams::Polygon {
                points: vec![
                    Vec2::new(0.0, 60.0),
                    Vec2::new(50.0, 0.0),
                    Vec2::new(100.0, 60.0),
                    Vec2::new(75.0, 120.0),
                    Vec2::new(25.0, 120.0),
                ],
            },
            ShapeKind::Line => ShapeParams::Line {
                length: DEFAULT_LINE_LENGTH,
                thickness: 5.0,
            },
            ShapeKind::Cube => ShapeParams::Cube {
                size: 100.0,
                depth: 50.0,
            },
            ShapeKind::Text => ShapeParams::Text {
                content: "Text".into(),
                character_size: DEFAULT_CHARACTER_SIZE,
            },
        }
    }

    /// Geometric values must be finite, and sizes positive.
    fn validate(&self) -> Result<(), ShapeError> {
        match self {
            ShapeParams::Circle { radius } => positive("radius", *radius).map(drop),
            ShapeParams::Rectangle { width, height } => {
                positive("width", *width)?;
                positive("height", *height).map(drop)
            }
            ShapeParams::Triangle { size } => positive("size", *size).map(drop),
            ShapeParams::Ellipse { radius_x, radius_y } => {
                positive("radius_x", *radius_x)?;
                positive("radius_y", *radius_y).map(drop)
            }
            ShapeParams::Polygon { points } => finite_points(points),
            ShapeParams::Line { length, thickness } => {
                positive("length", *length)?;
                positive("thickness", *thickness).map(drop)
            }
            ShapeParams::Cube { size, depth } => {
                positive("size", *size)?;
                finite("depth", *depth).map(drop)
            }
            ShapeParams::Text { character_size, .. } => {
                if *character_size == 0 {
                    Err(ShapeError::OutOfRange {
                        property: "character_size",
                        value: 0.0,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeParams::Circle { .. } => ShapeKind::Circle,
            ShapeParams::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeParams::Triangle { .. } => ShapeKind::Triangle,
            ShapeParams::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeParams::Polygon { .. } => ShapeKind::Polygon,
            ShapeParams::Line { .. } => ShapeKind::Line,
            ShapeParams::Cube { .. } => ShapeKind::Cube,
            ShapeParams::Text { .. } => ShapeKind::Text,
        }
    }
}

fn positive(property: &'static str, value: f32) -> Result<f32, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::OutOfRange { property, value })
    }
}

fn finite(property: &'static str, value: f32) -> Result<f32, ShapeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ShapeError::OutOfRange { property, value })
    }
}

fn finite_points(points: &[Vec2]) -> Result<(), ShapeError> {
    match points.iter().find(|p| !p.is_finite()) {
        Some(bad) => Err(ShapeError::OutOfRange {
            property: "points",
            value: if bad.x.is_finite() { bad.y } else { bad.x },
        }),
        None => Ok(()),
    }
}

fn single_token(content: &str) -> bool {
    !content.is_empty() && !content.chars().any(char::is_whitespace)
}

// ─── Shape ───────────────────────────────────────────────────────────────

/// A single geometric entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    position: Vec2,
    /// Degrees, always in [0, 360).
    rotation: f32,
    scale: Vec2,
    /// The scale the renderer draws with; differs from `scale` only while a
    /// circle or rectangle pulses.
    display_scale: Vec2,
    color: Color,
    selected: bool,
    animated: bool,
    geometry: Geometry,
}

impl Shape {
    /// Create a shape, validating its parameters.
    pub fn new(position: Vec2, color: Color, params: ShapeParams) -> Result<Self, ShapeError> {
        params.validate()?;
        Ok(Self::from_params(position, color, params))
    }

    /// Create a shape of `kind` with its default parameters.
    pub fn with_defaults(kind: ShapeKind, position: Vec2, color: Color) -> Self {
        Self::from_params(position, color, ShapeParams::default_for(kind))
    }

    fn from_params(position: Vec2, color: Color, params: ShapeParams) -> Self {
        let geometry = match params {
            ShapeParams::Circle { radius } => Geometry::Circle {
                radius,
                rotation_speed: 0.0,
                scale_speed: 0.0,
                pulse_time: 0.0,
            },
            ShapeParams::Rectangle { width, height } => Geometry::Rectangle {
                width,
                height,
                rotation_speed: 0.0,
                scale_speed: 0.0,
                pulse_time: 0.0,
            },
            ShapeParams::Triangle { size } => Geometry::Triangle {
                size,
                rotation_speed: 0.0,
            },
            ShapeParams::Ellipse { radius_x, radius_y } => Geometry::Ellipse {
                radius_x,
                radius_y,
                rotation_speed: 0.0,
            },
            ShapeParams::Polygon { points } => Geometry::Polygon {
                origin: polygon_origin(&points),
                points: points.into_iter().collect(),
                rotation_speed: 0.0,
            },
            ShapeParams::Line { length, thickness } => Geometry::Line {
                length,
                thickness,
                rotation_speed: 0.0,
            },
            ShapeParams::Cube { size, depth } => Geometry::Cube {
                size,
                depth,
                angle: 0.0,
                edges: place_edges(&cube_local_edges(size, depth), position, 0.0),
            },
            ShapeParams::Text {
                content,
                character_size,
            } => Geometry::Text {
                content,
                character_size,
                blink_interval: DEFAULT_BLINK_INTERVAL,
                blink_timer: 0.0,
                visible: true,
            },
        };

        Self {
            position,
            rotation: 0.0,
            scale: Vec2::ONE,
            display_scale: Vec2::ONE,
            color,
            selected: false,
            animated: false,
            geometry,
        }
    }

    /// Create a line between two endpoints. The position is their midpoint and
    /// the rotation is the direction from `start` to `end`.
    pub fn line(start: Vec2, end: Vec2, color: Color, thickness: f32) -> Result<Self, ShapeError> {
        let direction = end - start;
        let mut shape = Self::new(
            (start + end) / 2.0,
            color,
            ShapeParams::Line {
                length: direction.length(),
                thickness,
            },
        )?;
        shape.set_rotation(direction.y.atan2(direction.x).to_degrees());
        Ok(shape)
    }

    // ─── Common attributes ───────────────────────────────────────────────

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn display_scale(&self) -> Vec2 {
        self.display_scale
    }

    pub(crate) fn set_display_scale(&mut self, scale: Vec2) {
        self.display_scale = scale;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_position(&mut self, position: Vec2) {
        let previous = self.position;
        self.position = position;
        if let Geometry::Cube { angle, edges, .. } = &mut self.geometry {
            crate::transform::retransform_edges(edges, previous, *angle, position, *angle);
        }
    }

    /// Set the rotation in degrees, wrapped into [0, 360).
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(degrees);
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.display_scale = scale;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn enable_animation(&mut self, enable: bool) {
        self.animated = enable;
        if !enable {
            self.display_scale = self.scale;
        }
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    // ─── Variant-specific attributes ─────────────────────────────────────

    fn unsupported(&self, property: &'static str) -> ShapeError {
        ShapeError::Unsupported {
            kind: self.kind(),
            property,
        }
    }

    pub fn rotation_speed(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Circle { rotation_speed, .. }
            | Geometry::Rectangle { rotation_speed, .. }
            | Geometry::Triangle { rotation_speed, .. }
            | Geometry::Ellipse { rotation_speed, .. }
            | Geometry::Polygon { rotation_speed, .. }
            | Geometry::Line { rotation_speed, .. } => Some(rotation_speed),
            Geometry::Cube { .. } | Geometry::Text { .. } => None,
        }
    }

    pub fn set_rotation_speed(&mut self, speed: f32) -> Result<(), ShapeError> {
        let speed = finite("rotation_speed", speed)?;
        match &mut self.geometry {
            Geometry::Circle { rotation_speed, .. }
            | Geometry::Rectangle { rotation_speed, .. }
            | Geometry::Triangle { rotation_speed, .. }
            | Geometry::Ellipse { rotation_speed, .. }
            | Geometry::Polygon { rotation_speed, .. }
            | Geometry::Line { rotation_speed, .. } => {
                *rotation_speed = speed;
                Ok(())
            }
            Geometry::Cube { .. } | Geometry::Text { .. } => Err(self.unsupported("rotation speed")),
        }
    }

    pub fn scale_speed(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Circle { scale_speed, .. } | Geometry::Rectangle { scale_speed, .. } => {
                Some(scale_speed)
            }
            _ => None,
        }
    }

    pub fn set_scale_speed(&mut self, speed: f32) -> Result<(), ShapeError> {
        let speed = finite("scale_speed", speed)?;
        match &mut self.geometry {
            Geometry::Circle { scale_speed, .. } | Geometry::Rectangle { scale_speed, .. } => {
                *scale_speed = speed;
                Ok(())
            }
            _ => Err(self.unsupported("scale speed")),
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Circle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    pub fn set_radius(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("radius", value)?;
        match &mut self.geometry {
            Geometry::Circle { radius, .. } => {
                *radius = value;
                Ok(())
            }
            _ => Err(self.unsupported("radius")),
        }
    }

    /// Width and height of a rectangle.
    pub fn rect_size(&self) -> Option<Vec2> {
        match self.geometry {
            Geometry::Rectangle { width, height, .. } => Some(Vec2::new(width, height)),
            _ => None,
        }
    }

    pub fn set_rect_size(&mut self, size: Vec2) -> Result<(), ShapeError> {
        let w = positive("width", size.x)?;
        let h = positive("height", size.y)?;
        match &mut self.geometry {
            Geometry::Rectangle { width, height, .. } => {
                *width = w;
                *height = h;
                Ok(())
            }
            _ => Err(self.unsupported("size")),
        }
    }

    /// Edge scale of a triangle or a cube.
    pub fn edge_size(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Triangle { size, .. } | Geometry::Cube { size, .. } => Some(size),
            _ => None,
        }
    }

    pub fn set_triangle_size(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("size", value)?;
        match &mut self.geometry {
            Geometry::Triangle { size, .. } => {
                *size = value;
                Ok(())
            }
            _ => Err(self.unsupported("triangle size")),
        }
    }

    pub fn radii(&self) -> Option<Vec2> {
        match self.geometry {
            Geometry::Ellipse {
                radius_x, radius_y, ..
            } => Some(Vec2::new(radius_x, radius_y)),
            _ => None,
        }
    }

    pub fn set_radius_x(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("radius_x", value)?;
        match &mut self.geometry {
            Geometry::Ellipse { radius_x, .. } => {
                *radius_x = value;
                Ok(())
            }
            _ => Err(self.unsupported("radius x")),
        }
    }

    pub fn set_radius_y(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("radius_y", value)?;
        match &mut self.geometry {
            Geometry::Ellipse { radius_y, .. } => {
                *radius_y = value;
                Ok(())
            }
            _ => Err(self.unsupported("radius y")),
        }
    }

    pub fn points(&self) -> Option<&[Vec2]> {
        match &self.geometry {
            Geometry::Polygon { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Replace the outline of a polygon. The origin is recomputed from the
    /// half-extents of the new bounding box.
    pub fn set_points(&mut self, new_points: &[Vec2]) -> Result<(), ShapeError> {
        finite_points(new_points)?;
        match &mut self.geometry {
            Geometry::Polygon { points, origin, .. } => {
                *points = new_points.iter().copied().collect();
                *origin = polygon_origin(new_points);
                Ok(())
            }
            _ => Err(self.unsupported("points")),
        }
    }

    pub fn thickness(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Line { thickness, .. } => Some(thickness),
            _ => None,
        }
    }

    pub fn set_thickness(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("thickness", value)?;
        match &mut self.geometry {
            Geometry::Line { thickness, .. } => {
                *thickness = value;
                Ok(())
            }
            _ => Err(self.unsupported("thickness")),
        }
    }

    pub fn line_length(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Line { length, .. } => Some(length),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.geometry {
            Geometry::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Replace the text content. Content that is empty or contains whitespace
    /// is accepted here but cannot be written to a scene file.
    pub fn set_content(&mut self, new_content: &str) -> Result<(), ShapeError> {
        match &mut self.geometry {
            Geometry::Text { content, .. } => {
                if !single_token(new_content) {
                    log::debug!("text content {new_content:?} is not file-safe");
                }
                *content = new_content.to_string();
                Ok(())
            }
            _ => Err(self.unsupported("content")),
        }
    }

    pub fn character_size(&self) -> Option<u32> {
        match self.geometry {
            Geometry::Text { character_size, .. } => Some(character_size),
            _ => None,
        }
    }

    pub fn set_character_size(&mut self, value: u32) -> Result<(), ShapeError> {
        if value == 0 {
            return Err(ShapeError::OutOfRange {
                property: "character_size",
                value: 0.0,
            });
        }
        match &mut self.geometry {
            Geometry::Text { character_size, .. } => {
                *character_size = value;
                Ok(())
            }
            _ => Err(self.unsupported("character size")),
        }
    }

    pub fn set_blink_interval(&mut self, value: f32) -> Result<(), ShapeError> {
        let value = positive("blink_interval", value)?;
        match &mut self.geometry {
            Geometry::Text { blink_interval, .. } => {
                *blink_interval = value;
                Ok(())
            }
            _ => Err(self.unsupported("blink interval")),
        }
    }

    /// Whether the shape is currently drawn. Only text ever blinks out.
    pub fn is_visible(&self) -> bool {
        match self.geometry {
            Geometry::Text { visible, .. } => visible,
            _ => true,
        }
    }

    pub fn cube_depth(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Cube { depth, .. } => Some(depth),
            _ => None,
        }
    }

    pub fn cube_angle(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Cube { angle, .. } => Some(angle),
            _ => None,
        }
    }

    pub fn cube_edges(&self) -> Option<&[Segment; 12]> {
        match &self.geometry {
            Geometry::Cube { edges, .. } => Some(edges),
            _ => None,
        }
    }

    /// Rotate a cube by `delta` degrees.
    ///
    /// Each edge point is taken back to local space with the current angle
    /// and placed again with the new one, so repeated small rotations
    /// accumulate floating error in the stored edges.
    pub fn rotate(&mut self, delta: f32) -> Result<(), ShapeError> {
        let delta = finite("angle", delta)?;
        let position = self.position;
        match &mut self.geometry {
            Geometry::Cube { angle, edges, .. } => {
                let previous = *angle;
                *angle = wrap_degrees(previous + delta);
                crate::transform::retransform_edges(edges, position, previous, position, *angle);
                Ok(())
            }
            _ => Err(self.unsupported("cube rotation")),
        }
    }

    /// Restore a cube's accumulated angle (used when loading a scene).
    pub(crate) fn set_cube_angle(&mut self, value: f32) -> Result<(), ShapeError> {
        let current = self.cube_angle().ok_or_else(|| self.unsupported("cube rotation"))?;
        self.rotate(value - current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_to_hex() {
        assert_eq!(Color::rgb(0x6C, 0x5C, 0xE7).to_hex(), "#6C5CE7");
        assert_eq!(Color::rgba(255, 0, 0, 0x80).to_hex(), "#FF000080");
    }

    #[test]
    fn default_params_are_valid() {
        for kind in ShapeKind::ALL {
            let params = ShapeParams::default_for(kind);
            assert_eq!(params.kind(), kind);
            assert_eq!(params.validate(), Ok(()));
        }
    }

    #[test]
    fn kind_tags_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ShapeKind::from_tag(8), None);
        assert_eq!(ShapeKind::Cube.tag(), 6);
        assert_eq!(ShapeKind::Text.tag(), 7);
    }

    #[test]
    fn defaults_match_kind() {
        for kind in ShapeKind::ALL {
            let shape = Shape::with_defaults(kind, Vec2::new(10.0, 20.0), Color::WHITE);
            assert_eq!(shape.kind(), kind);
            assert_eq!(shape.rotation(), 0.0);
            assert_eq!(shape.scale(), Vec2::ONE);
            assert!(!shape.is_selected());
            assert!(!shape.is_animated());
        }
    }

    #[test]
    fn circle_defaults() {
        let c = Shape::with_defaults(ShapeKind::Circle, Vec2::new(400.0, 300.0), Color::GREEN);
        assert_eq!(c.radius(), Some(50.0));
        assert_eq!(c.rotation_speed(), Some(0.0));
        assert_eq!(c.scale_speed(), Some(0.0));
        assert_eq!(c.position(), Vec2::new(400.0, 300.0));
        assert_eq!(c.color(), Color::GREEN);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let err = Shape::new(Vec2::ZERO, Color::RED, ShapeParams::Circle { radius: -1.0 }).unwrap_err();
        assert_eq!(
            err,
            ShapeError::OutOfRange {
                property: "radius",
                value: -1.0
            }
        );
        assert!(
            Shape::new(
                Vec2::ZERO,
                Color::RED,
                ShapeParams::Text {
                    content: "x".into(),
                    character_size: 0
                }
            )
            .is_err()
        );
    }

    #[test]
    fn set_rotation_wraps() {
        let mut s = Shape::with_defaults(ShapeKind::Triangle, Vec2::ZERO, Color::RED);
        s.set_rotation(370.0);
        assert!((s.rotation() - 10.0).abs() < 1e-4);
        s.set_rotation(-90.0);
        assert!((s.rotation() - 270.0).abs() < 1e-4);
        s.set_rotation(360.0);
        assert_eq!(s.rotation(), 0.0);
    }

    #[test]
    fn set_scale_updates_display_scale() {
        let mut s = Shape::with_defaults(ShapeKind::Rectangle, Vec2::ZERO, Color::BLUE);
        s.set_scale(Vec2::new(2.0, 0.5));
        assert_eq!(s.scale(), Vec2::new(2.0, 0.5));
        assert_eq!(s.display_scale(), Vec2::new(2.0, 0.5));
    }

    #[test]
    fn variant_setters_reject_wrong_kind() {
        let mut text = Shape::with_defaults(ShapeKind::Text, Vec2::ZERO, Color::WHITE);
        assert_eq!(
            text.set_radius(10.0),
            Err(ShapeError::Unsupported {
                kind: ShapeKind::Text,
                property: "radius"
            })
        );
        assert!(text.set_rotation_speed(90.0).is_err());

        let mut circle = Shape::with_defaults(ShapeKind::Circle, Vec2::ZERO, Color::WHITE);
        assert!(circle.set_content("hi").is_err());
        assert!(circle.rotate(10.0).is_err());
        circle.set_radius(75.0).unwrap();
        assert_eq!(circle.radius(), Some(75.0));
    }

    #[test]
    fn polygon_origin_uses_bounding_box_half_extents() {
        let mut poly = Shape::with_defaults(ShapeKind::Polygon, Vec2::ZERO, Color::CYAN);
        match poly.geometry() {
            Geometry::Polygon { origin, .. } => assert_eq!(*origin, Vec2::new(50.0, 60.0)),
            other => panic!("expected polygon, got {other:?}"),
        }

        // Offset outline: half-extents, not the bounding box center.
        poly.set_points(&[Vec2::new(10.0, 10.0), Vec2::new(30.0, 10.0), Vec2::new(20.0, 50.0)])
            .unwrap();
        match poly.geometry() {
            Geometry::Polygon { origin, points, .. } => {
                assert_eq!(points.len(), 3);
                assert_eq!(*origin, Vec2::new(10.0, 20.0));
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn line_from_endpoints() {
        let line = Shape::line(Vec2::new(800.0, 500.0), Vec2::new(900.0, 600.0), Color::YELLOW, 4.0).unwrap();
        assert_eq!(line.position(), Vec2::new(850.0, 550.0));
        assert!((line.rotation() - 45.0).abs() < 1e-4);
        assert!((line.line_length().unwrap() - 141.42136).abs() < 1e-3);
        assert_eq!(line.thickness(), Some(4.0));
    }

    #[test]
    fn clone_is_independent() {
        let original = Shape::with_defaults(ShapeKind::Polygon, Vec2::ZERO, Color::CYAN);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_points(&[Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]).unwrap();
        copy.set_color(Color::RED);
        assert_eq!(original.points().unwrap().len(), 5);
        assert_eq!(original.color(), Color::CYAN);
    }

    #[test]
    fn disabling_animation_resets_display_scale() {
        let mut c = Shape::with_defaults(ShapeKind::Circle, Vec2::ZERO, Color::GREEN);
        c.set_display_scale(Vec2::new(1.5, 1.5));
        c.enable_animation(false);
        assert_eq!(c.display_scale(), c.scale());
    }
}
