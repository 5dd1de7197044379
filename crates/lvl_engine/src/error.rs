//! Unified error types for lvl_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lvl_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open file '{path}': {message}")]
    OpenFile { path: PathBuf, message: String },

    #[error("Failed to write file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    // === Loading Errors ===
    #[error("File too short: expected at least {expected} bytes, got {actual}")]
    FileTooShort { expected: usize, actual: usize },

    #[error("Unsupported level format version: {version}")]
    UnsupportedVersion { version: u32 },

    // === Viewport Errors ===
    #[error("Invalid zoom factor: {zoom}")]
    InvalidZoom { zoom: f32 },

    // === Model Errors ===
    #[error("Layer {layer} out of range (0..{max})")]
    LayerOutOfRange { layer: usize, max: usize },

    #[error("Section {section} out of range (0..{max})")]
    SectionOutOfRange { section: usize, max: usize },

    #[error("The last layer of a section can't be removed")]
    LastLayer,

    #[error("The last section of a level can't be removed")]
    LastSection,

    #[error("Unknown theme: {name}")]
    UnknownTheme { name: String },

    // === External Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for lvl_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    /// Create an open file error
    pub fn open_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::OpenFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a write file error
    pub fn write_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn file_too_short(expected: usize, actual: usize) -> Self {
        Self::FileTooShort { expected, actual }
    }
}
