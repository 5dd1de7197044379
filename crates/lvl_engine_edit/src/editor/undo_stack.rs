use crate::Result;

use super::EditorUndoOp;

pub trait UndoState {
    fn undo_description(&self) -> Option<String>;
    fn can_undo(&self) -> bool;
    /// Reverts the most recent history entry, no-op on an empty history.
    ///
    /// # Errors
    ///
    /// Fails if the entry references a layer index that no longer exists.
    fn undo(&mut self) -> Result<()>;

    fn redo_description(&self) -> Option<String>;
    fn can_redo(&self) -> bool;
    /// Re-applies the most recently undone entry, no-op if nothing was undone.
    ///
    /// # Errors
    ///
    /// Fails if the entry references a layer index that no longer exists.
    fn redo(&mut self) -> Result<()>;
}

/// Undo/redo history of an [`super::EditState`]. Both stacks are unbounded.
#[derive(Debug, Default)]
pub struct EditorUndoStack {
    /// Undo operations
    undo_stack: Vec<EditorUndoOp>,
    /// Redo operations
    redo_stack: Vec<EditorUndoOp>,
}

impl EditorUndoStack {
    /// Create a new empty undo stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new edit, any redo history is discarded
    pub fn push(&mut self, op: EditorUndoOp) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
    }

    /// Push onto the undo stack keeping the redo stack, used for regrouping and redo
    pub fn push_undo(&mut self, op: EditorUndoOp) {
        self.undo_stack.push(op);
    }

    /// Pop an operation from the undo stack
    pub fn pop_undo(&mut self) -> Option<EditorUndoOp> {
        self.undo_stack.pop()
    }

    /// Next operation `undo` would revert
    pub fn peek_undo(&self) -> Option<&EditorUndoOp> {
        self.undo_stack.last()
    }

    /// Push an operation onto the redo stack
    pub fn push_redo(&mut self, op: EditorUndoOp) {
        self.redo_stack.push(op);
    }

    /// Pop an operation from the redo stack
    pub fn pop_redo(&mut self) -> Option<EditorUndoOp> {
        self.redo_stack.pop()
    }

    /// Next operation `redo` would re-apply
    pub fn peek_redo(&self) -> Option<&EditorUndoOp> {
        self.redo_stack.last()
    }

    /// Removes every undo operation above `base_count`, oldest first.
    pub fn drain_from(&mut self, base_count: usize) -> Vec<EditorUndoOp> {
        let base_count = base_count.min(self.undo_stack.len());
        self.undo_stack.drain(base_count..).collect()
    }

    /// Get the number of undo operations
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo operations
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get description of next undo operation
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(EditorUndoOp::get_description)
    }

    /// Get description of next redo operation
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(EditorUndoOp::get_description)
    }

    /// Clear both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
