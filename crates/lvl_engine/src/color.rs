use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

/// Sky color of a freshly created section.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::new(92, 148, 252);

/// Named section background colors offered by the properties dialog.
pub const BACKGROUND_PRESETS: [(&str, Color); 6] = [
    ("SMB1 Sky", Color::new(92, 148, 252)),
    ("Night", Color::new(0, 0, 40)),
    ("Underground", Color::new(0, 0, 0)),
    ("Sunset", Color::new(255, 140, 60)),
    ("Cave", Color::new(30, 20, 10)),
    ("Water", Color::new(0, 80, 160)),
];

/// Looks up a background preset by name, ignoring ASCII case.
pub fn background_preset(name: &str) -> Option<Color> {
    BACKGROUND_PRESETS.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, c)| *c)
}
