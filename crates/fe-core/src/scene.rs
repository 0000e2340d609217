//! The ordered shape collection.

use crate::error::SceneError;
use crate::id::ShapeId;
use crate::model::Shape;
use crate::primitive::RenderPrimitive;

/// Ordered, index-addressed sequence of shapes.
///
/// Each entry also carries a `ShapeId` so history entries can find their
/// target after earlier entries were inserted or removed. Ids are not part of
/// a scene's observable state: equality compares shapes only.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    ids: Vec<ShapeId>,
}

impl PartialEq for Scene {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Append a shape with a fresh id and return its index.
    pub fn push(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.ids.push(ShapeId::next());
        self.shapes.len() - 1
    }

    /// Insert a shape under an existing id. `index == len()` appends.
    pub fn insert(&mut self, index: usize, id: ShapeId, shape: Shape) -> Result<(), SceneError> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        self.shapes.insert(index, shape);
        self.ids.insert(index, id);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<(ShapeId, Shape), SceneError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        Ok((self.ids.remove(index), self.shapes.remove(index)))
    }

    /// Replace the shape at `index`, returning the one it displaced.
    pub fn replace(&mut self, index: usize, shape: Shape) -> Result<Shape, SceneError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, shape))
    }

    pub fn get(&self, index: usize) -> Result<&Shape, SceneError> {
        self.shapes.get(index).ok_or(SceneError::IndexOutOfRange {
            index,
            len: self.shapes.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Shape, SceneError> {
        let len = self.shapes.len();
        self.shapes
            .get_mut(index)
            .ok_or(SceneError::IndexOutOfRange { index, len })
    }

    pub fn id_at(&self, index: usize) -> Option<ShapeId> {
        self.ids.get(index).copied()
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Iterate `(index, id, shape)` triples in order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, ShapeId, &Shape)> {
        self.ids
            .iter()
            .zip(self.shapes.iter())
            .enumerate()
            .map(|(index, (id, shape))| (index, *id, shape))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.ids.clear();
    }

    /// Advance every shape's animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for shape in &mut self.shapes {
            shape.update(dt);
        }
    }

    pub fn deselect_all(&mut self) {
        for shape in &mut self.shapes {
            shape.deselect();
        }
    }

    /// Render descriptions of every shape, in draw order.
    pub fn primitives(&self) -> Vec<RenderPrimitive> {
        self.shapes.iter().map(RenderPrimitive::from_shape).collect()
    }

    fn out_of_range(&self, index: usize) -> SceneError {
        SceneError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl FromIterator<Shape> for Scene {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for shape in iter {
            scene.push(shape);
        }
        scene
    }
}
