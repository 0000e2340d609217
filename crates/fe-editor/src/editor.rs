//! Editor facade: the operations a UI drives.
//!
//! The editor owns the scene and the history. Every mutating call applies
//! its change and records one `Action`; `undo`/`redo` pop history and apply
//! the effect. An entry that can no longer be applied is dropped from history
//! and reported.

use crate::commands::{Action, ActionKind, CommandStack};
use crate::config::EditorConfig;
use crate::error::EditorError;
use fe_core::{
    Color, RenderPrimitive, Scene, Shape, ShapeError, ShapeId, ShapeKind, ShapeParams, Vec2,
    decode_scene, encode_scene,
};
use serde::Serialize;
use std::path::Path;

/// One row of `Editor::list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub index: usize,
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// `Shape <n> (<Kind>)`, counting from 1.
    pub label: String,
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub color: String,
    pub selected: bool,
    pub animated: bool,
}

/// A batch of live modifications that becomes a single undo step.
struct Gesture {
    id: ShapeId,
    before: Shape,
    depth: usize,
}

pub struct Editor {
    scene: Scene,
    history: CommandStack,
    config: EditorConfig,
    gesture: Option<Gesture>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            history: CommandStack::new(config.max_history),
            config,
            gesture: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    // ─── Create / delete ─────────────────────────────────────────────────

    /// Create a shape at the end of the scene and return its index.
    pub fn create(&mut self, params: ShapeParams, position: Vec2, color: Color) -> Result<usize, EditorError> {
        let shape = Shape::new(position, color, params)?;
        Ok(self.add_shape(shape))
    }

    /// Create a shape of `kind` with default parameters.
    pub fn create_default(&mut self, kind: ShapeKind, position: Vec2, color: Color) -> usize {
        self.add_shape(Shape::with_defaults(kind, position, color))
    }

    /// Append an already-built shape.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        let snapshot = shape.clone();
        let index = self.scene.push(shape);
        let id = self.scene.id_at(index).unwrap_or_else(ShapeId::next);
        log::debug!("create {} at {index}", snapshot.kind());
        self.history.record(Action::Add {
            index,
            id,
            shape: snapshot,
        });
        index
    }

    /// Insert a shape at `index` (`index == len()` appends).
    pub fn insert_shape(&mut self, index: usize, shape: Shape) -> Result<(), EditorError> {
        let id = ShapeId::next();
        self.scene.insert(index, id, shape.clone())?;
        log::debug!("insert {} at {index}", shape.kind());
        self.history.record(Action::Add { index, id, shape });
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<(), EditorError> {
        if let Some(id) = self.scene.id_at(index)
            && self.gesture.as_ref().is_some_and(|g| g.id == id)
        {
            self.finish_gesture();
        }
        let (id, shape) = self
            .scene
            .remove(index)
            .map_err(|_| EditorError::NoShape { index })?;
        log::debug!("delete {} at {index}", shape.kind());
        self.history.record(Action::Remove { index, id, shape });
        Ok(())
    }

    // ─── Modify ──────────────────────────────────────────────────────────

    /// Apply `change` to the shape at `index` and record a Modify holding the
    /// pre-image. Nothing is recorded if the shape ends up unchanged, or while
    /// a gesture on that shape is open.
    pub fn modify<F>(&mut self, index: usize, change: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut Shape) -> Result<(), ShapeError>,
    {
        let id = self.scene.id_at(index).ok_or(EditorError::NoShape { index })?;
        let in_gesture = self.gesture.as_ref().is_some_and(|g| g.id == id);
        let shape = self
            .scene
            .get_mut(index)
            .map_err(|_| EditorError::NoShape { index })?;

        if in_gesture {
            change(shape)?;
            return Ok(());
        }

        let before = shape.clone();
        if let Err(err) = change(shape) {
            *shape = before;
            return Err(err.into());
        }
        if *shape != before {
            log::debug!("modify {} at {index}", shape.kind());
            self.history.record(Action::Modify {
                index,
                id,
                shape: before,
            });
        }
        Ok(())
    }

    pub fn set_position(&mut self, index: usize, position: Vec2) -> Result<(), EditorError> {
        check_finite("position", position.x)?;
        check_finite("position", position.y)?;
        self.modify(index, |s| {
            s.set_position(position);
            Ok(())
        })
    }

    pub fn set_rotation(&mut self, index: usize, degrees: f32) -> Result<(), EditorError> {
        check_finite("rotation", degrees)?;
        self.modify(index, |s| {
            s.set_rotation(degrees);
            Ok(())
        })
    }

    pub fn set_scale(&mut self, index: usize, scale: Vec2) -> Result<(), EditorError> {
        check_finite("scale", scale.x)?;
        check_finite("scale", scale.y)?;
        self.modify(index, |s| {
            s.set_scale(scale);
            Ok(())
        })
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), EditorError> {
        self.modify(index, |s| {
            s.set_color(color);
            Ok(())
        })
    }

    pub fn set_animated(&mut self, index: usize, animated: bool) -> Result<(), EditorError> {
        self.modify(index, |s| {
            s.enable_animation(animated);
            Ok(())
        })
    }

    pub fn set_rotation_speed(&mut self, index: usize, speed: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_rotation_speed(speed))
    }

    pub fn set_scale_speed(&mut self, index: usize, speed: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_scale_speed(speed))
    }

    pub fn set_radius(&mut self, index: usize, radius: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_radius(radius))
    }

    pub fn set_rect_size(&mut self, index: usize, size: Vec2) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_rect_size(size))
    }

    pub fn set_triangle_size(&mut self, index: usize, size: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_triangle_size(size))
    }

    pub fn set_radius_x(&mut self, index: usize, radius: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_radius_x(radius))
    }

    pub fn set_radius_y(&mut self, index: usize, radius: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_radius_y(radius))
    }

    pub fn set_points(&mut self, index: usize, points: &[Vec2]) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_points(points))
    }

    pub fn set_thickness(&mut self, index: usize, thickness: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_thickness(thickness))
    }

    pub fn set_content(&mut self, index: usize, content: &str) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_content(content))
    }

    pub fn set_character_size(&mut self, index: usize, size: u32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_character_size(size))
    }

    pub fn set_blink_interval(&mut self, index: usize, interval: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.set_blink_interval(interval))
    }

    /// Rotate a cube by `delta` degrees.
    pub fn rotate_cube(&mut self, index: usize, delta: f32) -> Result<(), EditorError> {
        self.modify(index, |s| s.rotate(delta))
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn shape(&self, index: usize) -> Result<&Shape, EditorError> {
        self.scene.get(index).map_err(|_| EditorError::NoShape { index })
    }

    pub fn position(&self, index: usize) -> Result<Vec2, EditorError> {
        Ok(self.shape(index)?.position())
    }

    pub fn rotation(&self, index: usize) -> Result<f32, EditorError> {
        Ok(self.shape(index)?.rotation())
    }

    pub fn scale(&self, index: usize) -> Result<Vec2, EditorError> {
        Ok(self.shape(index)?.scale())
    }

    pub fn color(&self, index: usize) -> Result<Color, EditorError> {
        Ok(self.shape(index)?.color())
    }

    pub fn kind(&self, index: usize) -> Result<ShapeKind, EditorError> {
        Ok(self.shape(index)?.kind())
    }

    pub fn list(&self) -> Vec<ShapeSummary> {
        self.scene
            .entries()
            .map(|(index, id, shape)| ShapeSummary {
                index,
                id,
                kind: shape.kind(),
                label: format!("Shape {} ({})", index + 1, shape.kind()),
                color: shape.color().to_hex(),
                selected: shape.is_selected(),
                animated: shape.is_animated(),
            })
            .collect()
    }

    pub fn primitives(&self) -> Vec<RenderPrimitive> {
        self.scene.primitives()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select the shape at `index` and deselect every other shape.
    /// Selection is not recorded in history.
    pub fn select(&mut self, index: usize) -> Result<(), EditorError> {
        if index >= self.scene.len() {
            return Err(EditorError::NoShape { index });
        }
        self.scene.deselect_all();
        self.scene
            .get_mut(index)
            .map_err(|_| EditorError::NoShape { index })?
            .select();
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.scene.deselect_all();
    }

    /// Index of the first selected shape.
    pub fn selected(&self) -> Option<usize> {
        self.scene.iter().position(Shape::is_selected)
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    /// Start a gesture on `index`. Modifications to that shape apply live
    /// until `end_gesture`, which records them as one step. Gestures nest; a
    /// gesture on another shape closes the open one first.
    pub fn begin_gesture(&mut self, index: usize) -> Result<(), EditorError> {
        let id = self.scene.id_at(index).ok_or(EditorError::NoShape { index })?;
        if let Some(gesture) = &mut self.gesture {
            if gesture.id == id {
                gesture.depth += 1;
                return Ok(());
            }
            self.finish_gesture();
        }
        let before = self.shape(index)?.clone();
        self.gesture = Some(Gesture { id, before, depth: 1 });
        Ok(())
    }

    /// Close one level of the open gesture. Closing the outermost level
    /// records a single Modify if the shape changed.
    pub fn end_gesture(&mut self) {
        let Some(gesture) = &mut self.gesture else {
            return;
        };
        gesture.depth -= 1;
        if gesture.depth == 0 {
            self.finish_gesture();
        }
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    fn finish_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let Some(index) = self.scene.index_of(gesture.id) else {
            return;
        };
        if let Ok(shape) = self.scene.get(index)
            && *shape != gesture.before
        {
            log::debug!("gesture on {} at {index} recorded", shape.kind());
            self.history.record(Action::Modify {
                index,
                id: gesture.id,
                shape: gesture.before,
            });
        }
    }

    // ─── Animation ───────────────────────────────────────────────────────

    /// Advance animation by `dt` seconds, clamped to the configured tick limit.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring tick with dt = {dt}");
            return;
        }
        let limit = self.config.tick_limit;
        let dt = if limit > 0.0 && dt > limit {
            log::warn!("clamping tick of {dt}s to {limit}s");
            limit
        } else {
            dt
        };
        self.scene.advance(dt);
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.gesture_pending()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the newest action. `Ok(None)` when there is nothing to undo.
    ///
    /// An action whose target can no longer be located is dropped from
    /// history and reported as `EditorError::StaleIndex`. Every structural
    /// edit made through `Editor` is recorded, so this only happens if the
    /// scene and history diverge.
    pub fn undo(&mut self) -> Result<Option<ActionKind>, EditorError> {
        self.finish_gesture();
        let Some(action) = self.history.undo() else {
            return Ok(None);
        };
        let kind = action.kind();
        let result = action.revert(&mut self.scene);
        if let Err(err) = result {
            self.history.discard_redo();
            return Err(err);
        }
        log::debug!("undo {kind:?}");
        Ok(Some(kind))
    }

    /// Redo the newest undone action. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<Option<ActionKind>, EditorError> {
        self.finish_gesture();
        let Some(action) = self.history.redo() else {
            return Ok(None);
        };
        let kind = action.kind();
        let result = action.reapply(&mut self.scene);
        if let Err(err) = result {
            self.history.discard_undo();
            return Err(err);
        }
        log::debug!("redo {kind:?}");
        Ok(Some(kind))
    }

    pub fn clear_history(&mut self) {
        self.gesture = None;
        self.history.clear();
    }

    fn gesture_pending(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| {
            self.scene
                .index_of(g.id)
                .and_then(|i| self.scene.get(i).ok())
                .is_some_and(|shape| *shape != g.before)
        })
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Encode the scene as text.
    pub fn to_text(&self) -> Result<String, EditorError> {
        Ok(encode_scene(&self.scene)?)
    }

    /// Replace the scene with one decoded from `text`. On failure the current
    /// scene is left untouched. History is cleared on success.
    pub fn load_str(&mut self, text: &str) -> Result<(), EditorError> {
        let scene = decode_scene(text)?;
        log::debug!("loaded {} shapes", scene.len());
        self.scene = scene;
        self.clear_history();
        Ok(())
    }

    /// Write the scene to `path`, overwriting it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let text = self.to_text()?;
        std::fs::write(path.as_ref(), text)?;
        log::debug!("saved {} shapes to {}", self.scene.len(), path.as_ref().display());
        Ok(())
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.load_str(&text)
    }
}

fn check_finite(property: &'static str, value: f32) -> Result<(), ShapeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::OutOfRange { property, value })
    }
}
