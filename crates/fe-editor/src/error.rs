use fe_core::{FormatError, SceneError, ShapeError, ShapeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("scene file: {0}")]
    Io(#[from] std::io::Error),

    /// A history entry's target can no longer be located. The entry has been
    /// dropped from history.
    #[error("history entry for shape {id} (index {index}) no longer applies")]
    StaleIndex { index: usize, id: ShapeId },

    #[error("no shape at index {index}")]
    NoShape { index: usize },
}
