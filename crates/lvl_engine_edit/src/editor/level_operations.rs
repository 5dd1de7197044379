#![allow(clippy::missing_errors_doc)]
use lvl_engine::{Color, GridPosition, Section, SectionId, MIN_SECTION_HEIGHT, MIN_SECTION_WIDTH};

use super::{EditState, EditorUndoOp, LevelProperties, SectionProperties};
use crate::Result;

impl EditState {
    pub fn level_properties(&self) -> LevelProperties {
        LevelProperties {
            name: self.level.name.clone(),
            author: self.level.author.clone(),
            start_position: self.level.start_position,
        }
    }

    pub fn section_properties(&self) -> SectionProperties {
        let section = self.level.current_section();
        SectionProperties {
            width: section.width(),
            height: section.height(),
            background_color: section.background_color,
            music: section.music,
        }
    }

    pub fn set_level_properties(&mut self, name: impl Into<String>, author: impl Into<String>) -> Result<()> {
        let new = LevelProperties {
            name: name.into(),
            author: author.into(),
            ..self.level_properties()
        };
        self.push_level_properties(new)
    }

    /// Moves the player start, snapped to its cell and clamped into the current section.
    pub fn set_start_position(&mut self, position: GridPosition) -> Result<()> {
        let new = LevelProperties {
            start_position: self.level.current_section().clamp_position(position),
            ..self.level_properties()
        };
        self.push_level_properties(new)
    }

    /// Resizes and recolors the current section, sizes are clamped to at least 20x10 cells.
    pub fn set_section_properties(&mut self, width: i32, height: i32, background_color: Color) -> Result<()> {
        let old = self.section_properties();
        let new = SectionProperties {
            width: width.max(MIN_SECTION_WIDTH),
            height: height.max(MIN_SECTION_HEIGHT),
            background_color,
            ..old
        };
        if new == old {
            return Ok(());
        }
        let section = self.level.current_section().id();
        self.push_undo_action(EditorUndoOp::SetSectionProperties { section, old, new })
    }

    /// Appends a new section and makes it current.
    pub fn add_section(&mut self, width: i32, height: i32) -> usize {
        let index = self
            .level
            .add_section(Section::new(width.max(MIN_SECTION_WIDTH), height.max(MIN_SECTION_HEIGHT)));
        self.set_current_section(index);
        self.mark_dirty();
        index
    }

    /// Removes a section. The history is cleared since its entries may reference the section.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        let section = self.level.remove_section(index)?;
        self.clear_undo_stack();
        self.selection.clear();
        self.sync_viewport();
        self.mark_dirty();
        Ok(section)
    }

    /// Out of range indices select the last section.
    pub fn set_current_section(&mut self, index: usize) {
        self.level.set_current_section(index);
        self.selection.clear();
        self.sync_viewport();
    }

    pub(crate) fn apply_level_properties(&mut self, properties: &LevelProperties) {
        self.level.name.clone_from(&properties.name);
        self.level.author.clone_from(&properties.author);
        self.level.start_position = properties.start_position;
    }

    pub(crate) fn apply_section_properties(&mut self, section: SectionId, properties: SectionProperties) -> Result<()> {
        let target = self.section_by_id_mut(section)?;
        target.set_size(properties.width, properties.height);
        target.background_color = properties.background_color;
        target.music = properties.music;
        if self.level.current_section().id() == section {
            self.sync_viewport();
        }
        Ok(())
    }

    fn push_level_properties(&mut self, new: LevelProperties) -> Result<()> {
        let old = self.level_properties();
        if new == old {
            return Ok(());
        }
        self.push_undo_action(EditorUndoOp::SetLevelProperties { old, new })
    }
}
