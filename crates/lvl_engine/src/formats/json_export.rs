//! Human readable JSON export. There is no importer, `.lvl` stays the round trip format.

use serde::Serialize;

use crate::{Level, ObjectKind, Result, Theme};

#[derive(Serialize)]
struct ExportDocument<'a> {
    name: &'a str,
    author: &'a str,
    tiles: Vec<ExportEntry<'a>>,
    bgos: Vec<ExportEntry<'a>>,
    npcs: Vec<ExportEntry<'a>>,
}

#[derive(Serialize)]
struct ExportEntry<'a> {
    x: i32,
    y: i32,
    #[serde(rename = "type")]
    type_name: &'a str,
    layer: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

fn entries<'a>(level: &'a Level, kind: ObjectKind, theme: Option<&Theme>) -> Vec<ExportEntry<'a>> {
    let mut result = Vec::new();
    for (layer_index, layer) in level.current_section().layers().iter().enumerate() {
        for object in layer.objects_of(kind) {
            result.push(ExportEntry {
                x: object.position().x,
                y: object.position().y,
                type_name: object.type_name(),
                layer: layer_index,
                color: theme.map(|theme| theme.color_for(object.object_type()).to_hex()),
            });
        }
    }
    result
}

/// Pretty printed export of the current section.
///
/// With a theme every entry additionally carries its `"#rrggbb"` color.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn export_json(level: &Level, theme: Option<&Theme>) -> Result<String> {
    let document = ExportDocument {
        name: &level.name,
        author: &level.author,
        tiles: entries(level, ObjectKind::Tile, theme),
        bgos: entries(level, ObjectKind::BackgroundObject, theme),
        npcs: entries(level, ObjectKind::Npc, theme),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
