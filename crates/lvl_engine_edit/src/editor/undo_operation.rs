//! Editor undo operations as a plain data enum
//!
//! Every operation addresses its target by section and layer id, never by index,
//! so entries stay valid while layers get reordered, removed and restored.

use lvl_engine::{Color, GridPosition, Layer, LayerId, PlacedObject, SectionId};

use crate::{EngineError, Result};

use super::EditState;

/// Level wide properties changed by the properties dialog
#[derive(Clone, Debug, PartialEq)]
pub struct LevelProperties {
    pub name: String,
    pub author: String,
    pub start_position: GridPosition,
}

/// Section properties changed by the properties dialog, sizes in cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionProperties {
    pub width: i32,
    pub height: i32,
    pub background_color: Color,
    pub music: u32,
}

#[derive(Clone, Debug)]
pub enum EditorUndoOp {
    /// Atomic group of operations
    Atomic { description: String, operations: Vec<EditorUndoOp> },

    PlaceObject { section: SectionId, layer: LayerId, object: PlacedObject },

    EraseObject { section: SectionId, layer: LayerId, object: PlacedObject },

    /// One flood fill: the tiles it replaced and the tiles it created
    FillRegion {
        section: SectionId,
        layer: LayerId,
        replaced: Vec<PlacedObject>,
        created: Vec<PlacedObject>,
    },

    /// Paste
    AddObjects {
        description: String,
        section: SectionId,
        objects: Vec<(LayerId, PlacedObject)>,
    },

    /// Cut, delete selection and clear all
    RemoveObjects {
        description: String,
        section: SectionId,
        objects: Vec<(LayerId, PlacedObject)>,
    },

    /// `layer` holds the layer while it is not part of the section
    AddLayer {
        section: SectionId,
        index: usize,
        id: LayerId,
        layer: Option<Layer>,
    },

    RemoveLayer {
        section: SectionId,
        index: usize,
        id: LayerId,
        layer: Option<Layer>,
    },

    SetLevelProperties { old: LevelProperties, new: LevelProperties },

    SetSectionProperties {
        section: SectionId,
        old: SectionProperties,
        new: SectionProperties,
    },
}

impl EditorUndoOp {
    pub fn get_description(&self) -> String {
        match self {
            EditorUndoOp::Atomic { description, .. } | EditorUndoOp::AddObjects { description, .. } | EditorUndoOp::RemoveObjects { description, .. } => {
                description.clone()
            }
            EditorUndoOp::PlaceObject { object, .. } => format!("Place {}", object.kind()),
            EditorUndoOp::EraseObject { object, .. } => format!("Erase {}", object.kind()),
            EditorUndoOp::FillRegion { .. } => "Fill".to_string(),
            EditorUndoOp::AddLayer { .. } => "Add Layer".to_string(),
            EditorUndoOp::RemoveLayer { .. } => "Remove Layer".to_string(),
            EditorUndoOp::SetLevelProperties { .. } => "Level Properties".to_string(),
            EditorUndoOp::SetSectionProperties { .. } => "Section Properties".to_string(),
        }
    }

    /// True if replaying this entry would mutate a layer that is locked right now.
    ///
    /// Layer insertion and removal and property changes never touch layer contents.
    pub fn targets_locked_layer(&self, edit_state: &EditState) -> bool {
        match self {
            EditorUndoOp::Atomic { operations, .. } => operations.iter().any(|op| op.targets_locked_layer(edit_state)),
            EditorUndoOp::PlaceObject { section, layer, .. } | EditorUndoOp::EraseObject { section, layer, .. } | EditorUndoOp::FillRegion { section, layer, .. } => {
                edit_state.is_layer_locked(*section, *layer)
            }
            EditorUndoOp::AddObjects { section, objects, .. } | EditorUndoOp::RemoveObjects { section, objects, .. } => {
                objects.iter().any(|(layer, _)| edit_state.is_layer_locked(*section, *layer))
            }
            EditorUndoOp::AddLayer { .. } | EditorUndoOp::RemoveLayer { .. } | EditorUndoOp::SetLevelProperties { .. } | EditorUndoOp::SetSectionProperties { .. } => {
                false
            }
        }
    }

    /// Perform the undo operation
    pub fn undo(&mut self, edit_state: &mut EditState) -> Result<()> {
        match self {
            EditorUndoOp::Atomic { operations, .. } => {
                for i in (0..operations.len()).rev() {
                    if let Err(err) = operations[i].undo(edit_state) {
                        // put back what was already undone
                        for op in &mut operations[i + 1..] {
                            if let Err(err) = op.redo(edit_state) {
                                log::error!("Can't restore '{}': {err}", op.get_description());
                            }
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
            EditorUndoOp::PlaceObject { section, layer, object } => {
                remove_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                Ok(())
            }
            EditorUndoOp::EraseObject { section, layer, object } => {
                insert_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                Ok(())
            }
            EditorUndoOp::FillRegion {
                section,
                layer,
                replaced,
                created,
            } => {
                let layer = edit_state.layer_by_id_mut(*section, *layer)?;
                remove_objects(layer, created);
                insert_objects(layer, replaced);
                Ok(())
            }
            EditorUndoOp::AddObjects { section, objects, .. } => {
                check_layers(edit_state, *section, objects)?;
                for (layer, object) in objects.iter().rev() {
                    remove_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                }
                Ok(())
            }
            EditorUndoOp::RemoveObjects { section, objects, .. } => {
                check_layers(edit_state, *section, objects)?;
                for (layer, object) in objects.iter() {
                    insert_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                }
                Ok(())
            }
            EditorUndoOp::AddLayer { section, index, id, layer } => {
                *layer = Some(take_layer(edit_state, *section, *id, index)?);
                Ok(())
            }
            EditorUndoOp::RemoveLayer { section, index, layer, .. } => {
                restore_layer(edit_state, *section, *index, layer)
            }
            EditorUndoOp::SetLevelProperties { old, .. } => {
                edit_state.apply_level_properties(old);
                Ok(())
            }
            EditorUndoOp::SetSectionProperties { section, old, .. } => edit_state.apply_section_properties(*section, *old),
        }
    }

    /// Perform the redo operation
    pub fn redo(&mut self, edit_state: &mut EditState) -> Result<()> {
        match self {
            EditorUndoOp::Atomic { operations, .. } => {
                for i in 0..operations.len() {
                    if let Err(err) = operations[i].redo(edit_state) {
                        for op in operations[..i].iter_mut().rev() {
                            if let Err(err) = op.undo(edit_state) {
                                log::error!("Can't restore '{}': {err}", op.get_description());
                            }
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
            EditorUndoOp::PlaceObject { section, layer, object } => {
                insert_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                Ok(())
            }
            EditorUndoOp::EraseObject { section, layer, object } => {
                remove_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                Ok(())
            }
            EditorUndoOp::FillRegion {
                section,
                layer,
                replaced,
                created,
            } => {
                let layer = edit_state.layer_by_id_mut(*section, *layer)?;
                remove_objects(layer, replaced);
                insert_objects(layer, created);
                Ok(())
            }
            EditorUndoOp::AddObjects { section, objects, .. } => {
                check_layers(edit_state, *section, objects)?;
                for (layer, object) in objects.iter() {
                    insert_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                }
                Ok(())
            }
            EditorUndoOp::RemoveObjects { section, objects, .. } => {
                check_layers(edit_state, *section, objects)?;
                for (layer, object) in objects.iter().rev() {
                    remove_objects(edit_state.layer_by_id_mut(*section, *layer)?, std::slice::from_ref(object));
                }
                Ok(())
            }
            EditorUndoOp::AddLayer { section, index, layer, .. } => restore_layer(edit_state, *section, *index, layer),
            EditorUndoOp::RemoveLayer { section, index, id, layer } => {
                *layer = Some(take_layer(edit_state, *section, *id, index)?);
                Ok(())
            }
            EditorUndoOp::SetLevelProperties { new, .. } => {
                edit_state.apply_level_properties(new);
                Ok(())
            }
            EditorUndoOp::SetSectionProperties { section, new, .. } => edit_state.apply_section_properties(*section, *new),
        }
    }
}

/// Fails before anything is changed if one of the layers is gone.
fn check_layers(edit_state: &EditState, section: SectionId, objects: &[(LayerId, PlacedObject)]) -> Result<()> {
    let Some(section_ref) = edit_state.level.section_by_id(section) else {
        return Err(EngineError::Generic(format!("Invalid section: {section}")));
    };
    match objects.iter().find(|(layer, _)| section_ref.layer_by_id(*layer).is_none()) {
        Some((layer, _)) => Err(EngineError::Generic(format!("Invalid layer: {layer}"))),
        None => Ok(()),
    }
}

fn insert_objects(layer: &mut Layer, objects: &[PlacedObject]) {
    for object in objects {
        if !layer.insert_object(object.clone()) {
            log::warn!("Can't restore {} at {} on '{}'", object.object_type(), object.position(), layer.title());
        }
    }
}

fn remove_objects(layer: &mut Layer, objects: &[PlacedObject]) {
    for object in objects {
        if layer.remove_object(object.id()).is_none() {
            log::warn!("{} {} is no longer on '{}'", object.object_type(), object.id(), layer.title());
        }
    }
}

/// Removes the layer `id` from its section, `index` is updated to where it was.
fn take_layer(edit_state: &mut EditState, section: SectionId, id: LayerId, index: &mut usize) -> Result<Layer> {
    let section = edit_state.section_by_id_mut(section)?;
    let Some(layer_index) = section.layer_index(id) else {
        return Err(EngineError::Generic(format!("Invalid layer: {id}")));
    };
    let layer = section.remove_layer(layer_index)?;
    *index = layer_index;
    edit_state.prune_selection();
    Ok(layer)
}

fn restore_layer(edit_state: &mut EditState, section: SectionId, index: usize, layer: &mut Option<Layer>) -> Result<()> {
    let section = edit_state.section_by_id_mut(section)?;
    if let Some(l) = layer.take() {
        let index = section.insert_layer(index, l);
        section.set_current_layer(index);
    }
    Ok(())
}
