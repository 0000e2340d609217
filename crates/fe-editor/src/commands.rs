//! Undo/Redo command stack.
//!
//! Every mutation the editor performs is recorded as an `Action` holding a
//! snapshot of the affected shape. The stack is a ledger only: it never
//! touches the scene. `undo`/`redo` move the top action to the other stack and
//! hand it back so the caller can apply the inverse or forward effect.

use crate::error::EditorError;
use fe_core::{Scene, Shape, ShapeId};
use serde::Serialize;

/// One reversible mutation.
///
/// The snapshot is an independent clone, never an alias of a live scene
/// entry. Actions move between stacks but are never duplicated, so the type
/// is deliberately not `Clone`.
#[derive(Debug, PartialEq)]
pub enum Action {
    /// `shape` was appended/inserted at `index`.
    Add {
        index: usize,
        id: ShapeId,
        shape: Shape,
    },
    /// `shape` was removed from `index`.
    Remove {
        index: usize,
        id: ShapeId,
        shape: Shape,
    },
    /// The entry at `index` was changed. `shape` holds the state that is not
    /// currently live: the pre-image while on the undo stack, the post-image
    /// while on the redo stack.
    Modify {
        index: usize,
        id: ShapeId,
        shape: Shape,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionKind {
    Add,
    Remove,
    Modify,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Add { .. } => ActionKind::Add,
            Action::Remove { .. } => ActionKind::Remove,
            Action::Modify { .. } => ActionKind::Modify,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Action::Add { index, .. } | Action::Remove { index, .. } | Action::Modify { index, .. } => *index,
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Action::Add { id, .. } | Action::Remove { id, .. } | Action::Modify { id, .. } => *id,
        }
    }

    pub fn shape(&self) -> &Shape {
        match self {
            Action::Add { shape, .. } | Action::Remove { shape, .. } | Action::Modify { shape, .. } => shape,
        }
    }

    fn shape_mut(&mut self) -> &mut Shape {
        match self {
            Action::Add { shape, .. } | Action::Remove { shape, .. } | Action::Modify { shape, .. } => shape,
        }
    }

    /// Point the action at a new index after earlier entries shifted.
    fn rebase(&mut self, new_index: usize) {
        match self {
            Action::Add { index, .. } | Action::Remove { index, .. } | Action::Modify { index, .. } => {
                *index = new_index;
            }
        }
    }

    /// Apply the inverse effect to `scene`: an Add removes its shape, a
    /// Remove reinserts a clone of its snapshot, a Modify swaps its snapshot
    /// with the live shape.
    ///
    /// The target is found by id. If it moved, the stored index is rebased; if
    /// it cannot be located, `EditorError::StaleIndex` is returned and the
    /// scene is left untouched.
    pub fn revert(&mut self, scene: &mut Scene) -> Result<(), EditorError> {
        match self.kind() {
            ActionKind::Add => self.remove_target(scene),
            ActionKind::Remove => self.reinsert_snapshot(scene),
            ActionKind::Modify => self.swap_snapshot(scene),
        }
    }

    /// Apply the forward effect to `scene`. Same lookup rules as `revert`.
    pub fn reapply(&mut self, scene: &mut Scene) -> Result<(), EditorError> {
        match self.kind() {
            ActionKind::Add => self.reinsert_snapshot(scene),
            ActionKind::Remove => self.remove_target(scene),
            ActionKind::Modify => self.swap_snapshot(scene),
        }
    }

    /// Live index of the target, rebasing if it moved.
    fn locate(&mut self, scene: &Scene) -> Result<usize, EditorError> {
        let Some(index) = scene.index_of(self.id()) else {
            return Err(self.stale());
        };
        if index != self.index() {
            log::debug!("rebasing {:?} from {} to {index}", self.kind(), self.index());
            self.rebase(index);
        }
        Ok(index)
    }

    fn stale(&self) -> EditorError {
        log::warn!(
            "cannot apply {:?} for {} at {}: target cannot be located",
            self.kind(),
            self.id(),
            self.index()
        );
        EditorError::StaleIndex {
            index: self.index(),
            id: self.id(),
        }
    }

    fn remove_target(&mut self, scene: &mut Scene) -> Result<(), EditorError> {
        let index = self.locate(scene)?;
        scene.remove(index)?;
        Ok(())
    }

    /// Reinserted shapes come back unselected.
    fn reinsert_snapshot(&self, scene: &mut Scene) -> Result<(), EditorError> {
        if scene.index_of(self.id()).is_some() || self.index() > scene.len() {
            return Err(self.stale());
        }
        let mut shape = self.shape().clone();
        shape.deselect();
        scene.insert(self.index(), self.id(), shape)?;
        Ok(())
    }

    /// The selection flag stays with the live entry.
    fn swap_snapshot(&mut self, scene: &mut Scene) -> Result<(), EditorError> {
        let index = self.locate(scene)?;
        let live = scene.get_mut(index)?;
        let selected = live.is_selected();
        std::mem::swap(live, self.shape_mut());
        if selected {
            live.select();
        } else {
            live.deselect();
        }
        self.shape_mut().deselect();
        Ok(())
    }
}

/// Undo and redo histories with an optional depth bound.
pub struct CommandStack {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    /// Maximum undo depth (0 = unbounded).
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Push a new action. Anything that could be redone is dropped.
    pub fn record(&mut self, action: Action) {
        log::debug!("record {:?} at {} ({})", action.kind(), action.index(), action.id());
        self.undo_stack.push(action);
        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
    }

    /// Move the newest action to the redo stack and return it. The caller
    /// applies the inverse effect.
    pub fn undo(&mut self) -> Option<&mut Action> {
        let action = self.undo_stack.pop()?;
        self.redo_stack.push(action);
        self.redo_stack.last_mut()
    }

    /// Move the newest undone action back to the undo stack and return it.
    /// The caller applies the forward effect.
    pub fn redo(&mut self) -> Option<&mut Action> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action);
        self.undo_stack.last_mut()
    }

    pub fn peek_undo(&self) -> Option<&Action> {
        self.undo_stack.last()
    }

    pub fn peek_redo(&self) -> Option<&Action> {
        self.redo_stack.last()
    }

    /// Drop the newest undo entry (one that can no longer be applied).
    pub fn discard_undo(&mut self) -> Option<Action> {
        self.undo_stack.pop()
    }

    /// Drop the newest redo entry.
    pub fn discard_redo(&mut self) -> Option<Action> {
        self.redo_stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
