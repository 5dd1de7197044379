#![allow(clippy::missing_errors_doc)]
use lvl_engine::{GridPosition, LayerId, ObjectId, ObjectType, PlacedObject, SectionId};

use super::{EditState, EditorUndoOp};
use crate::Result;

/// A selected object of the current section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedObject {
    pub layer: LayerId,
    pub object: ObjectId,
}

/// A copied object, detached from the model
#[derive(Clone, Debug, PartialEq)]
pub struct ClipboardEntry {
    pub layer: LayerId,
    pub object_type: ObjectType,
    pub position: GridPosition,
}

impl EditState {
    pub fn selection(&self) -> &[SelectedObject] {
        &self.selection
    }

    pub fn clipboard(&self) -> &[ClipboardEntry] {
        &self.clipboard
    }

    /// Selects the object under `position` on the current layer.
    ///
    /// With `extend` the hit toggles its membership, otherwise it replaces the selection.
    /// Returns the object that was hit.
    pub fn select_at(&mut self, position: GridPosition, extend: bool) -> Option<ObjectId> {
        let layer = self.level.current_section().current_layer();
        let hit = layer.object_at(position.snapped()).map(|object| SelectedObject {
            layer: layer.id(),
            object: object.id(),
        });

        if !extend {
            self.selection.clear();
        }
        let hit = hit?;
        if let Some(index) = self.selection.iter().position(|selected| *selected == hit) {
            self.selection.remove(index);
        } else {
            self.selection.push(hit);
        }
        Some(hit.object)
    }

    /// Selects every object of the current layer.
    pub fn select_all(&mut self) -> usize {
        let layer = self.level.current_section().current_layer();
        let layer_id = layer.id();
        self.selection = layer
            .objects()
            .map(|object| SelectedObject {
                layer: layer_id,
                object: object.id(),
            })
            .collect();
        self.selection.len()
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Removes the selected objects as one history entry, objects on locked layers stay.
    pub fn delete_selected(&mut self) -> Result<usize> {
        self.remove_selected("Delete")
    }

    /// Copies the selection into the clipboard, returns the number of copied objects.
    ///
    /// An empty selection keeps the previous clipboard.
    pub fn copy_selection(&mut self) -> usize {
        let section = self.level.current_section();
        let entries: Vec<_> = self
            .selection
            .iter()
            .filter_map(|selected| {
                let object = section.layer_by_id(selected.layer)?.find(selected.object)?;
                Some(ClipboardEntry {
                    layer: selected.layer,
                    object_type: object.object_type().clone(),
                    position: object.position(),
                })
            })
            .collect();
        let count = entries.len();
        if count > 0 {
            self.clipboard = entries;
        }
        count
    }

    pub fn cut_selection(&mut self) -> Result<usize> {
        self.copy_selection();
        self.remove_selected("Cut")
    }

    /// Pastes the clipboard so that its first entry lands on `base`.
    ///
    /// Objects go back to their source layer if it's still part of the current section,
    /// otherwise to the current layer. Entries outside the section, on a locked layer or
    /// on an occupied tile cell are skipped. The pasted objects become the selection.
    pub fn paste(&mut self, base: GridPosition) -> Result<Vec<PlacedObject>> {
        let Some(anchor) = self.clipboard.first().map(|entry| entry.position) else {
            return Ok(Vec::new());
        };
        let base = base.snapped();
        let section = self.level.current_section_mut();
        let section_id = section.id();
        let current = section.current_layer().id();

        let mut pasted = Vec::new();
        for entry in &self.clipboard {
            let position = base + (entry.position - anchor);
            if !section.contains(position) {
                continue;
            }
            let layer_id = if section.layer_by_id(entry.layer).is_some() { entry.layer } else { current };
            let Some(layer) = section.layer_by_id_mut(layer_id) else {
                continue;
            };
            let object = PlacedObject::new(entry.object_type.clone(), position);
            if layer.insert_object(object.clone()) {
                pasted.push((layer_id, object));
            }
        }
        if pasted.is_empty() {
            return Ok(Vec::new());
        }

        self.selection = pasted
            .iter()
            .map(|(layer, object)| SelectedObject {
                layer: *layer,
                object: object.id(),
            })
            .collect();
        let objects: Vec<_> = pasted.iter().map(|(_, object)| object.clone()).collect();
        self.push_plain_undo(EditorUndoOp::AddObjects {
            description: "Paste".to_string(),
            section: section_id,
            objects: pasted,
        })?;
        Ok(objects)
    }

    /// Removes every object of every unlocked layer in the current section.
    pub fn clear_all(&mut self) -> Result<usize> {
        let section = self.level.current_section_mut();
        let section_id = section.id();
        let mut removed = Vec::new();
        for index in 0..section.layer_count() {
            if let Some(layer) = section.layer_mut(index) {
                let layer_id = layer.id();
                removed.extend(layer.clear().into_iter().map(|object| (layer_id, object)));
            }
        }
        self.selection.clear();
        self.push_removed("Clear All", section_id, removed)
    }

    /// Drops selection entries whose object is gone.
    pub(crate) fn prune_selection(&mut self) {
        let section = self.level.current_section();
        self.selection
            .retain(|selected| section.layer_by_id(selected.layer).is_some_and(|layer| layer.find(selected.object).is_some()));
    }

    fn remove_selected(&mut self, description: &str) -> Result<usize> {
        let section = self.level.current_section_mut();
        let section_id = section.id();
        let mut removed = Vec::new();
        self.selection.retain(|selected| {
            let Some(layer) = section.layer_by_id_mut(selected.layer) else {
                return false;
            };
            if layer.is_locked() {
                return true;
            }
            if let Some(object) = layer.remove_object(selected.object) {
                removed.push((selected.layer, object));
            }
            false
        });
        self.push_removed(description, section_id, removed)
    }

    fn push_removed(&mut self, description: &str, section: SectionId, objects: Vec<(LayerId, PlacedObject)>) -> Result<usize> {
        if objects.is_empty() {
            return Ok(0);
        }
        let count = objects.len();
        self.push_plain_undo(EditorUndoOp::RemoveObjects {
            description: description.to_string(),
            section,
            objects,
        })?;
        Ok(count)
    }
}
