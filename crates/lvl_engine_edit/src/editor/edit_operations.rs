use lvl_engine::{fill_region, GridPosition, Layer, ObjectType, PlacedObject, Section};

use super::{EditState, EditorUndoOp};
use crate::{EngineError, Result};

impl EditState {
    /// Places `object_type` on the current layer.
    ///
    /// `position` is snapped and clamped into the current section. Returns `None`
    /// without touching the history if the layer is locked or a tile already occupies the cell.
    pub fn place_object(&mut self, position: GridPosition, object_type: &ObjectType) -> Result<Option<PlacedObject>> {
        let layer = self.get_current_layer();
        self.place_object_on(layer, position, object_type)
    }

    pub fn place_object_on(&mut self, layer: usize, position: GridPosition, object_type: &ObjectType) -> Result<Option<PlacedObject>> {
        let section = self.level.current_section_mut();
        let position = section.clamp_position(position);
        let section_id = section.id();
        let layer = layer_at(section, layer)?;
        let Some(object) = layer.place(position, object_type) else {
            return Ok(None);
        };
        let layer = layer.id();
        self.push_plain_undo(EditorUndoOp::PlaceObject {
            section: section_id,
            layer,
            object: object.clone(),
        })?;
        Ok(Some(object))
    }

    /// Erases the topmost object at `position` on the current layer, a tile before an NPC before a background object.
    ///
    /// An empty cell or a locked layer leaves model and history unchanged.
    pub fn erase_object(&mut self, position: GridPosition) -> Result<Option<PlacedObject>> {
        let layer = self.get_current_layer();
        self.erase_object_on(layer, position)
    }

    pub fn erase_object_on(&mut self, layer: usize, position: GridPosition) -> Result<Option<PlacedObject>> {
        let section = self.level.current_section_mut();
        let position = section.clamp_position(position);
        let section_id = section.id();
        let layer = layer_at(section, layer)?;
        let Some(object) = layer.erase(position) else {
            return Ok(None);
        };
        let layer = layer.id();
        self.push_plain_undo(EditorUndoOp::EraseObject {
            section: section_id,
            layer,
            object: object.clone(),
        })?;
        Ok(Some(object))
    }

    /// Flood fills the region of the current layer around `position` with tiles of `target`.
    ///
    /// Returns the created tiles. The whole fill is a single history entry.
    pub fn fill(&mut self, position: GridPosition, target: &ObjectType) -> Result<Vec<PlacedObject>> {
        let layer = self.get_current_layer();
        self.fill_on(layer, position, target)
    }

    pub fn fill_on(&mut self, layer: usize, position: GridPosition, target: &ObjectType) -> Result<Vec<PlacedObject>> {
        let section = self.level.current_section();
        let Some(fill_layer) = section.layer(layer) else {
            return Err(EngineError::LayerOutOfRange {
                layer,
                max: section.layer_count(),
            });
        };
        let region = fill_region(section, fill_layer, position, target);
        if region.is_empty() {
            return Ok(Vec::new());
        }

        let section = self.level.current_section_mut();
        let section_id = section.id();
        let layer = layer_at(section, layer)?;
        let mut replaced = Vec::new();
        let mut created = Vec::with_capacity(region.len());
        for cell in region {
            if let Some(id) = layer.tile_at(cell).map(PlacedObject::id) {
                replaced.extend(layer.remove_object(id));
            }
            created.extend(layer.place(cell, target));
        }
        log::debug!("Filled {} cells with {target}", created.len());

        let layer = layer.id();
        self.push_plain_undo(EditorUndoOp::FillRegion {
            section: section_id,
            layer,
            replaced,
            created: created.clone(),
        })?;
        Ok(created)
    }

    /// Places along a pencil drag, recorded as one history entry.
    pub fn place_stroke(&mut self, positions: &[GridPosition], object_type: &ObjectType) -> Result<Vec<PlacedObject>> {
        let mut guard = self.begin_atomic_undo("Draw");
        let mut placed = Vec::new();
        for position in positions {
            placed.extend(self.place_object(*position, object_type)?);
        }
        guard.end();
        Ok(placed)
    }

    /// Erases along an eraser drag, recorded as one history entry.
    pub fn erase_stroke(&mut self, positions: &[GridPosition]) -> Result<Vec<PlacedObject>> {
        let mut guard = self.begin_atomic_undo("Erase");
        let mut erased = Vec::new();
        for position in positions {
            erased.extend(self.erase_object(*position)?);
        }
        guard.end();
        Ok(erased)
    }
}

fn layer_at(section: &mut Section, layer: usize) -> Result<&mut Layer> {
    let max = section.layer_count();
    section.layer_mut(layer).ok_or(EngineError::LayerOutOfRange { layer, max })
}
