#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]
//! Data model and persistence for tile based platformer levels.
//!
//! A [`Level`] holds one or more [`Section`]s, each section is a bounded grid
//! subdivided into [`Layer`]s that own the placed tiles, background objects and NPCs.

mod error;
pub use error::*;

mod position;
pub use position::*;

mod color;
pub use color::*;

mod object;
pub use object::*;

pub mod type_table;

mod layer;
pub use layer::*;

mod section;
pub use section::*;

mod level;
pub use level::*;

mod viewport;
pub use viewport::*;

mod fill;
pub use fill::*;

mod theme;
pub use theme::*;

pub mod formats;
pub use formats::*;
