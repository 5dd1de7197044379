//! Level file formats: the binary `.lvl` format (load and save) and a write only JSON export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Level, Result, Theme};

mod lvl;
pub use lvl::*;

mod json_export;
pub use json_export::*;

/// Options for writing `.lvl` files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    /// Prefix the file with a magic and format version.
    /// Off by default, plain files are what other tools expect.
    #[serde(default)]
    pub versioned: bool,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn versioned() -> Self {
        Self { versioned: true }
    }
}

/// Writes the current section of `level` to `path`.
///
/// # Errors
///
/// Returns [`EngineError::WriteFile`] if the file can't be written.
pub fn save_level(path: &Path, level: &Level, options: &SaveOptions) -> Result<()> {
    let data = save_lvl(level.current_section(), options)?;
    std::fs::write(path, &data).map_err(|err| EngineError::write_file(path, err.to_string()))?;
    log::info!("Saved {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Reads a `.lvl` file into a fresh level with one section.
///
/// # Errors
///
/// Returns [`EngineError::OpenFile`] if the file can't be read and a format error if the data is malformed.
pub fn load_level(path: &Path) -> Result<Level> {
    let data = std::fs::read(path).map_err(|err| EngineError::open_file(path, err.to_string()))?;
    let section = load_lvl(&data)?;
    log::info!("Loaded {} objects from {}", section.object_count(), path.display());
    Ok(Level::new(section))
}

/// Writes the JSON export of the current section to `path`.
///
/// # Errors
///
/// Returns [`EngineError::WriteFile`] if the file can't be written.
pub fn export_json_file(path: &Path, level: &Level, theme: Option<&Theme>) -> Result<()> {
    let json = export_json(level, theme)?;
    std::fs::write(path, json).map_err(|err| EngineError::write_file(path, err.to_string()))?;
    log::info!("Exported {}", path.display());
    Ok(())
}
