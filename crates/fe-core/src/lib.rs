pub mod animate;
pub mod emitter;
pub mod error;
pub mod id;
pub mod model;
pub mod parser;
pub mod primitive;
pub mod scene;
pub mod transform;

pub use emitter::encode_scene;
pub use error::{FormatError, SceneError, ShapeError};
pub use id::ShapeId;
pub use model::*;
pub use parser::decode_scene;
pub use primitive::{Outline, PrimitiveGeometry, RenderPrimitive};
pub use scene::Scene;
pub use transform::wrap_degrees;
