#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
//! Editing layer on top of `lvl_engine`: an [`EditState`] owning one level plus
//! its viewport, undo history, selection and clipboard.

mod editor;
pub use editor::*;

// Re-export the model types editor users need
pub use lvl_engine::{
    background_preset, export_json, fill_region, EngineError, Extent, GridPosition, Layer, LayerId, Level, ObjectId, ObjectKind, ObjectType, PlacedObject, Point,
    Result, SaveOptions, Section, SectionId, Theme, Viewport, ZoomSettings,
};
