use crate::{EngineError, GridPosition, Result, Section, SectionId};

/// A complete level: level wide metadata plus at least one section.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub author: String,
    pub start_position: GridPosition,

    sections: Vec<Section>,
    current_section: usize,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(Section::default())
    }
}

impl Level {
    pub fn new(section: Section) -> Self {
        Self {
            name: "Untitled".to_string(),
            author: "Unknown".to_string(),
            start_position: GridPosition::new(100, 500).snapped(),
            sections: vec![section],
            current_section: 0,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn section_by_id(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id() == id)
    }

    pub fn section_by_id_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.id() == id)
    }

    pub fn current_section_index(&self) -> usize {
        self.current_section
    }

    /// Out of range indices are clamped to the last section.
    pub fn set_current_section(&mut self, index: usize) {
        self.current_section = index.min(self.sections.len() - 1);
    }

    pub fn current_section(&self) -> &Section {
        &self.sections[self.current_section]
    }

    pub fn current_section_mut(&mut self) -> &mut Section {
        &mut self.sections[self.current_section]
    }

    /// Appends a section and returns its index.
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// # Errors
    ///
    /// Fails for out of range indices and for the only section of the level.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        if index >= self.sections.len() {
            return Err(EngineError::SectionOutOfRange {
                section: index,
                max: self.sections.len(),
            });
        }
        if self.sections.len() == 1 {
            return Err(EngineError::LastSection);
        }
        let section = self.sections.remove(index);
        if self.current_section > index || self.current_section >= self.sections.len() {
            self.current_section = self.current_section.saturating_sub(1);
        }
        Ok(section)
    }
}
