//! Tests for place, erase and fill

use lvl_engine_edit::{EditState, GridPosition, Level, ObjectKind, ObjectType, Section, UndoState};
use pretty_assertions::assert_eq;

/// Helper to create an EditState with a section of the given size in cells
fn create_test_state(width: i32, height: i32) -> EditState {
    EditState::from_level(Level::new(Section::new(width, height)))
}

fn cell(col: i32, row: i32) -> GridPosition {
    GridPosition::from_cell(col, row)
}

fn tile_name(state: &EditState, col: i32, row: i32) -> Option<String> {
    state.get_cur_layer().tile_at(cell(col, row)).map(|t| t.type_name().to_string())
}

// ============================================================================
// Place Tests
// ============================================================================

#[test]
fn test_place_pushes_one_undo() {
    let mut state = create_test_state(20, 10);
    let placed = state.place_object(cell(2, 3), &ObjectType::tile("ground")).unwrap().unwrap();

    assert_eq!(placed.position(), GridPosition::new(64, 96));
    assert_eq!(state.undo_stack_len(), 1);
    assert!(state.is_dirty());
}

#[test]
fn test_place_on_occupied_tile_cell() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(2, 3), &ObjectType::tile("ground")).unwrap();

    assert!(state.place_object(cell(2, 3), &ObjectType::tile("brick")).unwrap().is_none());
    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(tile_name(&state, 2, 3), Some("ground".to_string()));
}

#[test]
fn test_npcs_and_background_objects_share_cells() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(1, 1), &ObjectType::tile("ground")).unwrap();
    state.place_object(cell(1, 1), &ObjectType::npc("goomba")).unwrap().unwrap();
    state.place_object(cell(1, 1), &ObjectType::npc("koopa")).unwrap().unwrap();
    state.place_object(cell(1, 1), &ObjectType::background_object("bush")).unwrap().unwrap();

    assert_eq!(state.get_cur_layer().len(), 4);
    assert_eq!(state.undo_stack_len(), 4);
}

#[test]
fn test_place_snaps_to_cell() {
    let mut state = create_test_state(20, 10);
    let placed = state.place_object(GridPosition::new(70, 40), &ObjectType::npc("goomba")).unwrap().unwrap();
    assert_eq!(placed.position(), cell(2, 1));
}

#[test]
fn test_place_on_locked_layer() {
    let mut state = create_test_state(20, 10);
    state.set_layer_locked(0, true).unwrap();

    assert!(state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap().is_none());
    assert!(state.get_cur_layer().is_empty());
    assert_eq!(state.undo_stack_len(), 0);
}

// ============================================================================
// Erase Tests
// ============================================================================

#[test]
fn test_erase_empty_cell_pushes_nothing() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    let undo_len = state.undo_stack_len();

    assert!(state.erase_object(cell(4, 4)).unwrap().is_none());
    assert_eq!(state.undo_stack_len(), undo_len);
}

#[test]
fn test_erase_prefers_tile_then_npc_then_background_object() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(1, 1), &ObjectType::background_object("bush")).unwrap();
    state.place_object(cell(1, 1), &ObjectType::npc("goomba")).unwrap();
    state.place_object(cell(1, 1), &ObjectType::tile("ground")).unwrap();

    let kinds: Vec<_> = (0..3).map(|_| state.erase_object(cell(1, 1)).unwrap().unwrap().kind()).collect();
    assert_eq!(kinds, vec![ObjectKind::Tile, ObjectKind::Npc, ObjectKind::BackgroundObject]);
    assert!(state.erase_object(cell(1, 1)).unwrap().is_none());
}

#[test]
fn test_erase_undo_restores_same_object() {
    let mut state = create_test_state(20, 10);
    let placed = state.place_object(cell(5, 5), &ObjectType::tile("brick")).unwrap().unwrap();
    state.erase_object(cell(5, 5)).unwrap();
    assert_eq!(tile_name(&state, 5, 5), None);

    state.undo().unwrap();
    assert_eq!(state.get_cur_layer().tile_at(cell(5, 5)).map(|t| t.id()), Some(placed.id()));
}

#[test]
fn test_erase_stroke() {
    let mut state = create_test_state(20, 10);
    for col in 0..5 {
        state.place_object(cell(col, 2), &ObjectType::tile("ground")).unwrap();
    }
    let stroke: Vec<_> = (0..8).map(|col| cell(col, 2)).collect();
    assert_eq!(state.erase_stroke(&stroke).unwrap().len(), 5);
    assert_eq!(state.undo_stack_len(), 6);
    assert_eq!(state.undo_description(), Some("Erase".to_string()));

    state.undo().unwrap();
    assert_eq!(state.get_cur_layer().len(), 5);
}

// ============================================================================
// Fill Tests
// ============================================================================

#[test]
fn test_fill_converts_connected_ground() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.place_object(cell(1, 0), &ObjectType::tile("ground")).unwrap();
    state.place_object(cell(5, 5), &ObjectType::tile("ground")).unwrap();
    let undo_len = state.undo_stack_len();

    let created = state.fill(cell(0, 0), &ObjectType::tile("brick")).unwrap();

    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|t| t.type_name() == "brick"));
    assert_eq!(tile_name(&state, 0, 0), Some("brick".to_string()));
    assert_eq!(tile_name(&state, 1, 0), Some("brick".to_string()));
    assert_eq!(tile_name(&state, 5, 5), Some("ground".to_string()));
    assert_eq!(state.undo_stack_len(), undo_len + 1);
}

#[test]
fn test_fill_empty_area_stops_at_tiles() {
    // a closed ring of ground around (2, 2)
    let mut state = create_test_state(20, 10);
    for (col, row) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
        state.place_object(cell(col, row), &ObjectType::tile("ground")).unwrap();
    }

    let inside = state.fill(cell(2, 2), &ObjectType::tile("coin")).unwrap();
    assert_eq!(inside.len(), 1);

    let outside = state.fill(cell(0, 0), &ObjectType::tile("ice")).unwrap();
    assert_eq!(outside.len(), 20 * 10 - 9);
}

#[test]
fn test_fill_undo_restores_prior_state() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.place_object(cell(1, 0), &ObjectType::tile("ground")).unwrap();
    let before = state.get_cur_layer().clone();

    state.fill(cell(0, 0), &ObjectType::tile("brick")).unwrap();
    state.undo().unwrap();

    assert_eq!(state.get_cur_layer(), &before);
}

#[test]
fn test_fill_noops() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    let undo_len = state.undo_stack_len();

    // same type as the seed
    assert!(state.fill(cell(0, 0), &ObjectType::tile("ground")).unwrap().is_empty());
    // not a tile type
    assert!(state.fill(cell(3, 3), &ObjectType::npc("goomba")).unwrap().is_empty());
    // seed outside the section
    assert!(state.fill(cell(40, 40), &ObjectType::tile("brick")).unwrap().is_empty());

    state.set_layer_locked(0, true).unwrap();
    assert!(state.fill(cell(3, 3), &ObjectType::tile("brick")).unwrap().is_empty());

    assert_eq!(state.undo_stack_len(), undo_len);
}

#[test]
fn test_fill_keeps_npcs() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(4, 4), &ObjectType::npc("goomba")).unwrap();
    state.fill(cell(0, 0), &ObjectType::tile("ground")).unwrap();

    assert_eq!(state.get_cur_layer().npcs().len(), 1);
    assert_eq!(state.get_cur_layer().tiles().count(), 200);
}
