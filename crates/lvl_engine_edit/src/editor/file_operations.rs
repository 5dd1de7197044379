#![allow(clippy::missing_errors_doc)]
use std::path::Path;

use lvl_engine::{export_json_file, load_level, save_level, Level, Section, Theme};

use super::EditState;
use crate::{EngineError, Result};

impl EditState {
    /// Replaces the level with an empty one of the given size in cells.
    pub fn new_level(&mut self, width: i32, height: i32) {
        self.replace_level(Level::new(Section::new(width, height)));
        self.file_name = None;
    }

    /// Loads a `.lvl` file. On failure the current level stays untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let level = load_level(path)?;
        self.replace_level(level);
        self.file_name = Some(path.to_path_buf());
        Ok(())
    }

    /// Saves to the file the level was loaded from or last saved to.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_name.clone() else {
            return Err(EngineError::generic("Level has no file name yet"));
        };
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        save_level(path, &self.level, &self.save_options)?;
        self.file_name = Some(path.to_path_buf());
        self.is_dirty = false;
        Ok(())
    }

    pub fn export_json(&self, path: &Path, theme: Option<&Theme>) -> Result<()> {
        export_json_file(path, &self.level, theme)
    }

    fn replace_level(&mut self, level: Level) {
        self.level = level;
        self.clear_undo_stack();
        self.selection.clear();
        self.is_dirty = false;
        self.sync_viewport();
        self.viewport.reset_zoom();
    }
}
