pub mod commands;
pub mod config;
pub mod editor;
pub mod error;

pub use commands::{Action, ActionKind, CommandStack};
pub use config::EditorConfig;
pub use editor::{Editor, ShapeSummary};
pub use error::EditorError;
