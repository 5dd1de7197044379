//! Binary level format (.lvl) I/O implementation.
//!
//! ```text
//! [magic "LVL\x1A" u32 version]     optional, only in versioned files
//! tile_count u32, bgo_count u32, npc_count u32
//! tile_count * record, bgo_count * record, npc_count * record
//! record: x u32, y u32, type_id u32, layer_index u32, event_id u32
//! ```
//! Everything is little endian. `x`/`y` are world units.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::SaveOptions;
use crate::{type_table, EngineError, GridPosition, Layer, ObjectKind, ObjectType, PlacedObject, Result, Section, CELL_SIZE, MAX_SECTION_CELLS};

pub const LVL_MAGIC: [u8; 4] = *b"LVL\x1A";
pub const LVL_VERSION: u32 = 1;
pub const LVL_HEADER_SIZE: usize = 12;
pub const LVL_RECORD_SIZE: usize = 20;

/// Records referencing higher layer indices are dropped on load.
pub const MAX_LAYERS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Record {
    x: u32,
    y: u32,
    type_id: u32,
    layer: u32,
    event_id: u32,
}

impl Record {
    fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self {
            x: cursor.read_u32::<LittleEndian>()?,
            y: cursor.read_u32::<LittleEndian>()?,
            type_id: cursor.read_u32::<LittleEndian>()?,
            layer: cursor.read_u32::<LittleEndian>()?,
            event_id: cursor.read_u32::<LittleEndian>()?,
        })
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u32::<LittleEndian>(self.x)?;
        out.write_u32::<LittleEndian>(self.y)?;
        out.write_u32::<LittleEndian>(self.type_id)?;
        out.write_u32::<LittleEndian>(self.layer)?;
        out.write_u32::<LittleEndian>(self.event_id)?;
        Ok(())
    }
}

fn collect_records(section: &Section, kind: ObjectKind) -> Vec<Record> {
    let mut records = Vec::new();
    for (layer_index, layer) in section.layers().iter().enumerate() {
        for object in layer.objects_of(kind) {
            let (Ok(x), Ok(y)) = (u32::try_from(object.position().x), u32::try_from(object.position().y)) else {
                log::warn!("Skipping {} at negative position {}", object.object_type(), object.position());
                continue;
            };
            let type_id = object.object_type().file_id().unwrap_or_else(|| {
                let fallback = type_table::table(kind).fallback_id();
                log::warn!("No file id for {}, writing id {fallback}", object.object_type());
                fallback
            });
            records.push(Record {
                x,
                y,
                type_id,
                layer: layer_index as u32,
                event_id: 0,
            });
        }
    }
    records
}

/// Serializes the full layer stack of `section`.
///
/// # Errors
///
/// Fails only if the record buffer can't be written.
pub fn save_lvl(section: &Section, options: &SaveOptions) -> Result<Vec<u8>> {
    let tiles = collect_records(section, ObjectKind::Tile);
    let background_objects = collect_records(section, ObjectKind::BackgroundObject);
    let npcs = collect_records(section, ObjectKind::Npc);

    let record_count = tiles.len() + background_objects.len() + npcs.len();
    let mut result = Vec::with_capacity(8 + LVL_HEADER_SIZE + record_count * LVL_RECORD_SIZE);
    if options.versioned {
        result.extend_from_slice(&LVL_MAGIC);
        result.write_u32::<LittleEndian>(LVL_VERSION)?;
    }
    result.write_u32::<LittleEndian>(tiles.len() as u32)?;
    result.write_u32::<LittleEndian>(background_objects.len() as u32)?;
    result.write_u32::<LittleEndian>(npcs.len() as u32)?;
    for record in tiles.iter().chain(&background_objects).chain(&npcs) {
        record.write(&mut result)?;
    }
    Ok(result)
}

/// Parses `.lvl` data into a new section.
///
/// Unknown type ids, records on layers beyond [`MAX_LAYERS`] and records outside
/// [`MAX_SECTION_CELLS`] are skipped with a warning.
/// Missing layers are created, and the section grows to contain every loaded object.
///
/// # Errors
///
/// Fails with [`EngineError::FileTooShort`] if the header or a record is cut off and with
/// [`EngineError::UnsupportedVersion`] for versioned files of an unknown version.
pub fn load_lvl(data: &[u8]) -> Result<Section> {
    let mut body = data;
    if data.starts_with(&LVL_MAGIC) {
        if data.len() < 8 {
            return Err(EngineError::file_too_short(8, data.len()));
        }
        let version = Cursor::new(&data[4..8]).read_u32::<LittleEndian>()?;
        if version != LVL_VERSION {
            return Err(EngineError::UnsupportedVersion { version });
        }
        body = &data[8..];
    }

    if body.len() < LVL_HEADER_SIZE {
        return Err(EngineError::file_too_short(LVL_HEADER_SIZE, body.len()));
    }
    let mut cursor = Cursor::new(body);
    let counts = [
        (ObjectKind::Tile, cursor.read_u32::<LittleEndian>()?),
        (ObjectKind::BackgroundObject, cursor.read_u32::<LittleEndian>()?),
        (ObjectKind::Npc, cursor.read_u32::<LittleEndian>()?),
    ];

    let record_count: u64 = counts.iter().map(|(_, count)| u64::from(*count)).sum();
    let expected = LVL_HEADER_SIZE as u64 + record_count * LVL_RECORD_SIZE as u64;
    if (body.len() as u64) < expected {
        return Err(EngineError::file_too_short(usize::try_from(expected).unwrap_or(usize::MAX), body.len()));
    }
    if body.len() as u64 > expected {
        log::warn!("Ignoring {} trailing bytes after the last record", body.len() as u64 - expected);
    }

    let mut section = Section::default();
    let mut max_col = 0;
    let mut max_row = 0;
    for (kind, count) in counts {
        for _ in 0..count {
            let record = Record::read(&mut cursor)?;
            let Some(name) = type_table::name_for(kind, record.type_id) else {
                log::warn!("Skipping {kind} with unknown type id {}", record.type_id);
                continue;
            };
            let layer_index = record.layer as usize;
            if layer_index >= MAX_LAYERS {
                log::warn!("Skipping {kind} '{name}' on layer {layer_index}, at most {MAX_LAYERS} layers are supported");
                continue;
            }
            let (Ok(x), Ok(y)) = (i32::try_from(record.x), i32::try_from(record.y)) else {
                log::warn!("Skipping {kind} '{name}' at out of range position ({}, {})", record.x, record.y);
                continue;
            };
            if x / CELL_SIZE >= MAX_SECTION_CELLS || y / CELL_SIZE >= MAX_SECTION_CELLS {
                log::warn!("Skipping {kind} '{name}' at ({x}, {y}), sections are at most {MAX_SECTION_CELLS} cells wide and high");
                continue;
            }
            while section.layer_count() <= layer_index {
                let title = section.next_layer_title();
                section.push_layer(Layer::new(title));
            }

            let position = GridPosition::new(x, y);
            let Some(layer) = section.layer_mut(layer_index) else {
                continue;
            };
            if !layer.insert_object(PlacedObject::new(ObjectType::new(kind, name), position)) {
                log::warn!("Skipping duplicate tile '{name}' at {position}");
                continue;
            }
            max_col = max_col.max(x / CELL_SIZE);
            max_row = max_row.max(y / CELL_SIZE);
        }
    }

    if max_col >= section.width() || max_row >= section.height() {
        let width = section.width().max(max_col + 1);
        let height = section.height().max(max_row + 1);
        log::debug!("Growing section to {width}x{height} to fit loaded objects");
        section.set_size(width, height);
    }
    Ok(section)
}
