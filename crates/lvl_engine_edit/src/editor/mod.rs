pub mod undo_stack;
use std::{path::PathBuf, sync::Arc};

use parking_lot::Mutex;
pub use undo_stack::*;

pub mod undo_operation;
pub use undo_operation::{EditorUndoOp, LevelProperties, SectionProperties};

mod edit_operations;
mod file_operations;
mod layer_operations;
mod level_operations;
mod selection_operations;
pub use selection_operations::{ClipboardEntry, SelectedObject};

use lvl_engine::{Extent, GridPosition, Layer, LayerId, Level, Point, SaveOptions, Section, SectionId, Viewport, ZoomSettings};

use crate::{EngineError, Result};

/// Canvas size used until the front end reports the real one.
pub const DEFAULT_VIEWPORT_SIZE: Extent = Extent::new(800.0, 600.0);

pub struct EditState {
    level: Level,
    viewport: Viewport,

    undo_stack: Arc<Mutex<EditorUndoStack>>,

    selection: Vec<SelectedObject>,
    clipboard: Vec<ClipboardEntry>,

    file_name: Option<PathBuf>,
    save_options: SaveOptions,
    is_dirty: bool,
}

/// Guard for atomic undo operations
/// When dropped, collects all operations pushed since creation into an Atomic operation
pub struct AtomicUndoGuard {
    base_count: usize,
    description: String,
    undo_stack: Arc<Mutex<EditorUndoStack>>,
    ended: bool,
}

impl AtomicUndoGuard {
    fn new(description: String, undo_stack: Arc<Mutex<EditorUndoStack>>) -> Self {
        let base_count = undo_stack.lock().undo_len();
        Self {
            base_count,
            description,
            undo_stack,
            ended: false,
        }
    }

    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.end_action();
    }

    fn end_action(&mut self) {
        self.ended = true;
        let mut stack = self.undo_stack.lock();
        let mut operations = stack.drain_from(self.base_count);
        match operations.len() {
            0 => {}
            1 => {
                if let Some(op) = operations.pop() {
                    stack.push_undo(op);
                }
            }
            _ => stack.push_undo(EditorUndoOp::Atomic {
                description: self.description.clone(),
                operations,
            }),
        }
    }
}

impl Drop for AtomicUndoGuard {
    fn drop(&mut self) {
        self.end();
    }
}

impl Default for EditState {
    fn default() -> Self {
        Self::from_level(Level::default())
    }
}

impl EditState {
    pub fn from_level(level: Level) -> Self {
        Self::with_viewport(level, DEFAULT_VIEWPORT_SIZE, ZoomSettings::default())
    }

    pub fn with_viewport(level: Level, viewport_size: Extent, zoom_settings: ZoomSettings) -> Self {
        let viewport = Viewport::for_section(level.current_section(), viewport_size, zoom_settings);
        Self {
            level,
            viewport,
            undo_stack: Arc::new(Mutex::new(EditorUndoStack::new())),
            selection: Vec::new(),
            clipboard: Vec::new(),
            file_name: None,
            save_options: SaveOptions::default(),
            is_dirty: false,
        }
    }

    pub fn get_level(&self) -> &Level {
        &self.level
    }

    /// Direct model access, changes made through it bypass the history.
    pub fn get_level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn get_current_section(&self) -> &Section {
        self.level.current_section()
    }

    pub fn get_cur_layer(&self) -> &Layer {
        self.level.current_section().current_layer()
    }

    pub fn get_current_layer(&self) -> usize {
        self.level.current_section().current_layer_index()
    }

    pub fn get_viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn get_viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn set_viewport_size(&mut self, size: Extent) {
        self.viewport.set_size(size);
    }

    /// Grid cell under a canvas pixel.
    pub fn screen_to_grid(&self, screen: Point) -> GridPosition {
        self.viewport.screen_to_grid(screen)
    }

    pub fn get_file_name(&self) -> Option<&PathBuf> {
        self.file_name.as_ref()
    }

    pub fn set_file_name(&mut self, file_name: impl Into<PathBuf>) {
        self.file_name = Some(file_name.into());
    }

    pub fn get_save_options(&self) -> &SaveOptions {
        &self.save_options
    }

    pub fn set_save_options(&mut self, save_options: SaveOptions) {
        self.save_options = save_options;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn set_is_dirty(&mut self, is_dirty: bool) {
        self.is_dirty = is_dirty;
    }

    /// Starts grouping every following history entry into one, until the guard is dropped.
    #[must_use]
    pub fn begin_atomic_undo(&mut self, description: impl Into<String>) -> AtomicUndoGuard {
        AtomicUndoGuard::new(description.into(), self.undo_stack.clone())
    }

    /// Applies `op` and records it.
    pub(crate) fn push_undo_action(&mut self, mut op: EditorUndoOp) -> Result<()> {
        op.redo(self)?;
        self.push_plain_undo(op)
    }

    /// Push an undo operation without executing it
    pub(crate) fn push_plain_undo(&mut self, op: EditorUndoOp) -> Result<()> {
        log::debug!("{}", op.get_description());
        self.mark_dirty();
        self.undo_stack.lock().push(op);
        Ok(())
    }

    /// Returns the undo stack len of this [`EditState`].
    pub fn undo_stack_len(&self) -> usize {
        self.undo_stack.lock().undo_len()
    }

    pub fn redo_stack_len(&self) -> usize {
        self.undo_stack.lock().redo_len()
    }

    /// Forgets all history, needed whenever sections disappear.
    pub fn clear_undo_stack(&mut self) {
        self.undo_stack.lock().clear();
    }

    pub(crate) fn is_layer_locked(&self, section: SectionId, layer: LayerId) -> bool {
        self.level
            .section_by_id(section)
            .and_then(|section| section.layer_by_id(layer))
            .is_some_and(Layer::is_locked)
    }

    pub(crate) fn section_by_id_mut(&mut self, section: SectionId) -> Result<&mut Section> {
        self.level
            .section_by_id_mut(section)
            .ok_or_else(|| EngineError::Generic(format!("Invalid section: {section}")))
    }

    pub(crate) fn layer_by_id_mut(&mut self, section: SectionId, layer: LayerId) -> Result<&mut Layer> {
        self.section_by_id_mut(section)?
            .layer_by_id_mut(layer)
            .ok_or_else(|| EngineError::Generic(format!("Invalid layer: {layer}")))
    }

    /// Keeps the viewport content in sync with the current section size.
    pub(crate) fn sync_viewport(&mut self) {
        let section = self.level.current_section();
        self.viewport
            .set_content(Extent::new(section.pixel_width() as f32, section.pixel_height() as f32));
    }
}

impl UndoState for EditState {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.lock().undo_description()
    }

    fn can_undo(&self) -> bool {
        self.undo_stack.lock().can_undo()
    }

    fn undo(&mut self) -> Result<()> {
        let blocked = {
            let stack = self.undo_stack.lock();
            match stack.peek_undo() {
                None => return Ok(()),
                Some(op) => op.targets_locked_layer(self).then(|| op.get_description()),
            }
        };
        if let Some(description) = blocked {
            log::warn!("Can't undo '{description}', its layer is locked");
            return Ok(());
        }

        let Some(mut op) = self.undo_stack.lock().pop_undo() else {
            return Ok(());
        };
        self.mark_dirty();
        let res = op.undo(self);
        {
            // a failed entry is rolled back and stays where it was
            let mut stack = self.undo_stack.lock();
            if res.is_ok() {
                stack.push_redo(op);
            } else {
                stack.push_undo(op);
            }
        }
        self.prune_selection();
        res
    }

    fn redo_description(&self) -> Option<String> {
        self.undo_stack.lock().redo_description()
    }

    fn can_redo(&self) -> bool {
        self.undo_stack.lock().can_redo()
    }

    fn redo(&mut self) -> Result<()> {
        let blocked = {
            let stack = self.undo_stack.lock();
            match stack.peek_redo() {
                None => return Ok(()),
                Some(op) => op.targets_locked_layer(self).then(|| op.get_description()),
            }
        };
        if let Some(description) = blocked {
            log::warn!("Can't redo '{description}', its layer is locked");
            return Ok(());
        }

        let Some(mut op) = self.undo_stack.lock().pop_redo() else {
            return Ok(());
        };
        self.mark_dirty();
        let res = op.redo(self);
        {
            let mut stack = self.undo_stack.lock();
            if res.is_ok() {
                stack.push_undo(op);
            } else {
                stack.push_redo(op);
            }
        }
        self.prune_selection();
        res
    }
}
