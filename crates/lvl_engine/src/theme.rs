//! Color palettes for drawing and exporting levels.
//!
//! A theme is always passed explicitly to whoever needs it, the level model itself never refers to one.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{Color, EngineError, ObjectKind, ObjectType, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    colors: HashMap<&'static str, Color>,
}

/// Used for types a palette has no entry for.
pub const FALLBACK_COLOR: Color = Color::new(128, 128, 128);

fn build(name: &'static str, background: Color, entries: &[(&'static str, (u8, u8, u8))]) -> Theme {
    Theme {
        name,
        background,
        colors: entries.iter().map(|(key, rgb)| (*key, Color::from(*rgb))).collect(),
    }
}

lazy_static! {
    static ref THEMES: Vec<Theme> = vec![
        build(
            "SMB1",
            Color::new(92, 148, 252),
            &[
                ("ground", (0, 128, 0)),
                ("brick", (180, 80, 40)),
                ("question", (255, 200, 0)),
                ("coin", (255, 255, 0)),
                ("pipe_vertical", (0, 200, 0)),
                ("pipe_horizontal", (0, 180, 0)),
                ("platform", (139, 69, 19)),
                ("goomba", (200, 100, 0)),
                ("koopa_green", (0, 200, 50)),
                ("koopa_red", (200, 50, 50)),
                ("mushroom", (255, 0, 200)),
                ("flower", (255, 140, 0)),
                ("star", (255, 230, 0)),
                ("bgo_cloud", (220, 220, 220)),
                ("bgo_bush", (0, 160, 0)),
                ("bgo_hill", (100, 200, 100)),
                ("bgo_tree", (0, 120, 0)),
                ("grass", (60, 180, 60)),
                ("sand", (220, 200, 100)),
                ("dirt", (150, 100, 60)),
                ("stone", (140, 140, 140)),
                ("ice", (160, 220, 255)),
                ("bridge", (160, 100, 40)),
                ("mushroom_platform", (200, 100, 200)),
                ("pswitch", (80, 80, 200)),
            ],
        ),
        build(
            "SMB3",
            Color::new(0, 0, 0),
            &[
                ("ground", (160, 120, 80)),
                ("brick", (180, 100, 60)),
                ("question", (255, 210, 0)),
                ("coin", (255, 255, 100)),
                ("pipe_vertical", (0, 180, 0)),
                ("pipe_horizontal", (0, 160, 0)),
                ("platform", (100, 100, 100)),
                ("goomba", (255, 50, 50)),
                ("koopa_green", (0, 200, 0)),
                ("koopa_red", (200, 0, 0)),
                ("mushroom", (255, 100, 200)),
                ("flower", (255, 150, 0)),
                ("star", (255, 255, 0)),
                ("bgo_cloud", (150, 150, 150)),
                ("bgo_bush", (0, 100, 0)),
                ("bgo_hill", (80, 160, 80)),
                ("bgo_tree", (0, 80, 0)),
                ("grass", (130, 100, 60)),
                ("sand", (200, 170, 80)),
                ("dirt", (120, 80, 40)),
                ("stone", (110, 110, 110)),
                ("ice", (130, 190, 230)),
                ("bridge", (130, 80, 30)),
                ("mushroom_platform", (170, 80, 170)),
                ("pswitch", (60, 60, 170)),
            ],
        ),
        build(
            "SMW",
            Color::new(110, 200, 255),
            &[
                ("ground", (200, 160, 100)),
                ("brick", (210, 120, 70)),
                ("question", (255, 220, 0)),
                ("coin", (255, 240, 0)),
                ("pipe_vertical", (0, 220, 80)),
                ("pipe_horizontal", (0, 200, 70)),
                ("platform", (180, 130, 70)),
                ("goomba", (210, 120, 0)),
                ("koopa_green", (0, 220, 80)),
                ("koopa_red", (220, 60, 60)),
                ("mushroom", (255, 50, 200)),
                ("flower", (255, 160, 0)),
                ("star", (255, 240, 0)),
                ("bgo_cloud", (240, 240, 240)),
                ("bgo_bush", (0, 200, 80)),
                ("bgo_hill", (120, 220, 120)),
                ("bgo_tree", (0, 160, 60)),
                ("grass", (80, 200, 80)),
                ("sand", (230, 210, 120)),
                ("dirt", (170, 120, 70)),
                ("stone", (160, 160, 160)),
                ("ice", (180, 230, 255)),
                ("bridge", (180, 120, 50)),
                ("mushroom_platform", (220, 120, 220)),
                ("pswitch", (100, 100, 220)),
            ],
        ),
    ];
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &THEMES
    }

    /// # Errors
    ///
    /// Returns [`EngineError::UnknownTheme`] if no theme has that name (ASCII case is ignored).
    pub fn by_name(name: &str) -> Result<&'static Theme> {
        THEMES
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::UnknownTheme { name: name.to_string() })
    }

    pub fn color_for(&self, object_type: &ObjectType) -> Color {
        if object_type.kind == ObjectKind::BackgroundObject {
            if let Some(color) = self.colors.get(format!("bgo_{}", object_type.name).as_str()) {
                return *color;
            }
        }
        self.colors.get(object_type.name.as_str()).copied().unwrap_or(FALLBACK_COLOR)
    }
}
