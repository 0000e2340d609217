//! Error types for the shape model, the scene collection, and the scene text format.

use crate::model::ShapeKind;
use thiserror::Error;

/// A scene file could not be decoded, or a scene could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unexpected end of input reading {field} (record {record})")]
    UnexpectedEnd { record: usize, field: &'static str },

    #[error("invalid number {token:?} for {field} (record {record})")]
    InvalidNumber {
        record: usize,
        field: &'static str,
        token: String,
    },

    #[error("unknown shape type tag {tag} (record {record})")]
    UnknownTag { record: usize, tag: u32 },

    #[error("{field} out of range: {token} (record {record})")]
    OutOfRange {
        record: usize,
        field: &'static str,
        token: String,
    },

    #[error("text content {content:?} cannot be stored as a single token (record {record})")]
    UnencodableText { record: usize, content: String },
}

/// A shape-level setter was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("{kind} shapes have no {property}")]
    Unsupported {
        kind: ShapeKind,
        property: &'static str,
    },

    #[error("{property} out of range: {value}")]
    OutOfRange { property: &'static str, value: f32 },
}

/// An index-addressed scene operation fell outside the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("index {index} out of range for scene of {len} shapes")]
    IndexOutOfRange { index: usize, len: usize },
}
