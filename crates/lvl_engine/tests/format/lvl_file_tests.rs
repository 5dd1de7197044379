use lvl_engine::{
    export_json_file, load_level, load_lvl, save_level, save_lvl, type_table, EngineError, GridPosition, Layer, Level, ObjectKind, ObjectType, SaveOptions,
    Section, Theme,
};
use pretty_assertions::assert_eq;

/// (layer index, kind, type name, position) of every object, sorted
fn contents(section: &Section) -> Vec<(usize, ObjectKind, String, GridPosition)> {
    let mut result: Vec<_> = section
        .layers()
        .iter()
        .enumerate()
        .flat_map(|(i, layer)| layer.objects().map(move |o| (i, o.kind(), o.type_name().to_string(), o.position())))
        .collect();
    result.sort();
    result
}

fn sample_level() -> Level {
    let mut level = Level::default();
    let section = level.current_section_mut();
    let layer = section.current_layer_mut();
    for (i, name) in type_table::table(ObjectKind::Tile).names().enumerate() {
        layer.place(GridPosition::from_cell(i as i32, 10), &ObjectType::tile(name));
    }
    for (i, name) in type_table::table(ObjectKind::BackgroundObject).names().enumerate() {
        layer.place(GridPosition::from_cell(i as i32, 5), &ObjectType::background_object(name));
    }
    section.push_layer(Layer::new("Layer 2"));
    let layer = section.layer_mut(1).unwrap();
    for (i, name) in type_table::table(ObjectKind::Npc).names().enumerate() {
        layer.place(GridPosition::from_cell(i as i32, 9), &ObjectType::npc(name));
    }
    // two NPCs may share a cell
    layer.place(GridPosition::from_cell(0, 9), &ObjectType::npc("goomba"));
    level
}

// ============================================================================
// File size
// ============================================================================

#[test]
fn test_three_tiles_one_npc_is_92_bytes() {
    let mut section = Section::default();
    let layer = section.current_layer_mut();
    layer.place(GridPosition::from_cell(0, 0), &ObjectType::tile("ground"));
    layer.place(GridPosition::from_cell(1, 0), &ObjectType::tile("ground"));
    layer.place(GridPosition::from_cell(2, 0), &ObjectType::tile("brick"));
    layer.place(GridPosition::from_cell(3, 0), &ObjectType::npc("goomba"));

    let data = save_lvl(&section, &SaveOptions::default()).unwrap();
    assert_eq!(data.len(), 92);
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.lvl");
    let level = sample_level();

    save_level(&path, &level, &SaveOptions::default()).unwrap();
    let loaded = load_level(&path).unwrap();

    assert_eq!(contents(loaded.current_section()), contents(level.current_section()));
    assert_eq!(loaded.current_section().layer_count(), 2);
}

#[test]
fn test_roundtrip_versioned() {
    let level = sample_level();
    let data = save_lvl(level.current_section(), &SaveOptions::versioned()).unwrap();
    let section = load_lvl(&data).unwrap();
    assert_eq!(contents(&section), contents(level.current_section()));
}

#[test]
fn test_unknown_type_name_falls_back_to_first_id() {
    let mut section = Section::default();
    section
        .current_layer_mut()
        .place(GridPosition::from_cell(0, 0), &ObjectType::tile("lava"));

    let loaded = load_lvl(&save_lvl(&section, &SaveOptions::default()).unwrap()).unwrap();
    assert_eq!(loaded.layer(0).unwrap().tile_at(GridPosition::from_cell(0, 0)).unwrap().type_name(), "ground");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_level(&dir.path().join("missing.lvl"));
    assert!(matches!(result, Err(EngineError::OpenFile { .. })));
}

#[test]
fn test_load_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.lvl");
    let mut data = save_lvl(sample_level().current_section(), &SaveOptions::default()).unwrap();
    data.truncate(data.len() - 7);
    std::fs::write(&path, data).unwrap();

    assert!(matches!(load_level(&path), Err(EngineError::FileTooShort { .. })));
}

#[test]
fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.lvl");
    let result = save_level(&path, &Level::default(), &SaveOptions::default());
    assert!(matches!(result, Err(EngineError::WriteFile { .. })));
}

// ============================================================================
// JSON export
// ============================================================================

#[test]
fn test_export_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.json");
    export_json_file(&path, &sample_level(), Some(Theme::by_name("SMB3").unwrap())).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["tiles"].as_array().unwrap().len(), 15);
    assert_eq!(json["bgos"].as_array().unwrap().len(), 9);
    assert_eq!(json["npcs"].as_array().unwrap().len(), 20);
    assert_eq!(json["tiles"][0]["color"], "#a07850");
}
