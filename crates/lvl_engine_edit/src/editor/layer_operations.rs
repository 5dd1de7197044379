#![allow(clippy::missing_errors_doc)]
use lvl_engine::Layer;

use super::{EditState, EditorUndoOp};
use crate::{EngineError, Result};

impl EditState {
    /// Adds a layer above the current one and makes it current, an empty title picks "Layer N".
    pub fn add_new_layer(&mut self, title: &str) -> Result<usize> {
        let section = self.level.current_section();
        let title = if title.trim().is_empty() { section.next_layer_title() } else { title.to_string() };
        let layer = Layer::new(title);
        let index = section.current_layer_index() + 1;
        let op = EditorUndoOp::AddLayer {
            section: section.id(),
            index,
            id: layer.id(),
            layer: Some(layer),
        };
        self.push_undo_action(op)?;
        Ok(self.get_current_layer())
    }

    pub fn remove_layer(&mut self, layer: usize) -> Result<()> {
        let section = self.level.current_section();
        let Some(l) = section.layer(layer) else {
            return Err(EngineError::LayerOutOfRange {
                layer,
                max: section.layer_count(),
            });
        };
        if section.layer_count() == 1 {
            return Err(EngineError::LastLayer);
        }
        let op = EditorUndoOp::RemoveLayer {
            section: section.id(),
            index: layer,
            id: l.id(),
            layer: None,
        };
        self.push_undo_action(op)
    }

    pub fn raise_layer(&mut self, layer: usize) -> Result<()> {
        let section = self.level.current_section_mut();
        if layer + 1 >= section.layer_count() {
            return Err(EngineError::LayerOutOfRange {
                layer: layer + 1,
                max: section.layer_count(),
            });
        }
        section.move_layer(layer, layer + 1)?;
        self.mark_dirty();
        Ok(())
    }

    pub fn lower_layer(&mut self, layer: usize) -> Result<()> {
        if layer == 0 {
            return Ok(());
        }
        self.level.current_section_mut().move_layer(layer, layer - 1)?;
        self.mark_dirty();
        Ok(())
    }

    /// Out of range indices select the top layer.
    pub fn set_current_layer(&mut self, layer: usize) {
        self.level.current_section_mut().set_current_layer(layer);
        self.selection.clear();
    }

    pub fn set_layer_visible(&mut self, layer: usize, is_visible: bool) -> Result<()> {
        self.layer_mut(layer)?.set_visible(is_visible);
        self.mark_dirty();
        Ok(())
    }

    /// Locking also blocks undo and redo of entries that touch the layer.
    pub fn set_layer_locked(&mut self, layer: usize, is_locked: bool) -> Result<()> {
        self.layer_mut(layer)?.set_locked(is_locked);
        self.mark_dirty();
        Ok(())
    }

    pub fn rename_layer(&mut self, layer: usize, title: impl Into<String>) -> Result<()> {
        self.layer_mut(layer)?.set_title(title);
        self.mark_dirty();
        Ok(())
    }

    fn layer_mut(&mut self, layer: usize) -> Result<&mut Layer> {
        let section = self.level.current_section_mut();
        let max = section.layer_count();
        section.layer_mut(layer).ok_or(EngineError::LayerOutOfRange { layer, max })
    }
}
