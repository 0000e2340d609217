//! Vello painter and hit testing for FigEdit render primitives.

pub mod geometry;
pub mod hit;
pub mod paint;

pub use geometry::primitive_bounds;
pub use hit::hit_test;
pub use paint::paint_scene;
