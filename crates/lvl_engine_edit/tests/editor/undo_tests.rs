//! Tests for the undo history: inverse law, truncation and locked layers

use std::collections::HashSet;

use lvl_engine_edit::{EditState, GridPosition, Level, ObjectKind, ObjectType, Section, UndoState};
use pretty_assertions::assert_eq;

fn create_test_state(width: i32, height: i32) -> EditState {
    EditState::from_level(Level::new(Section::new(width, height)))
}

fn cell(col: i32, row: i32) -> GridPosition {
    GridPosition::from_cell(col, row)
}

/// Checks apply, revert, apply ends in the state of a single apply.
fn assert_inverse_law(state: &mut EditState) {
    let applied = state.get_level().clone();
    state.undo().unwrap();
    state.redo().unwrap();
    assert_eq!(state.get_level(), &applied);
}

// ============================================================================
// Inverse law
// ============================================================================

#[test]
fn test_inverse_law_place_and_erase() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(1, 1), &ObjectType::tile("ground")).unwrap();
    assert_inverse_law(&mut state);

    state.erase_object(cell(1, 1)).unwrap();
    assert_inverse_law(&mut state);
}

#[test]
fn test_inverse_law_fill() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.fill(cell(3, 3), &ObjectType::tile("brick")).unwrap();
    assert_inverse_law(&mut state);
}

#[test]
fn test_inverse_law_layers_and_properties() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();

    state.add_new_layer("Foreground").unwrap();
    assert_inverse_law(&mut state);

    state.remove_layer(0).unwrap();
    assert_inverse_law(&mut state);

    state.set_level_properties("World 1-1", "Me").unwrap();
    assert_inverse_law(&mut state);

    state.set_section_properties(30, 12, lvl_engine_edit::background_preset("night").unwrap()).unwrap();
    assert_inverse_law(&mut state);
}

#[test]
fn test_undo_all_returns_to_start() {
    let mut state = create_test_state(20, 10);
    let start = state.get_level().clone();

    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.place_object(cell(1, 0), &ObjectType::tile("ground")).unwrap();
    state.fill(cell(0, 0), &ObjectType::tile("brick")).unwrap();
    state.add_new_layer("").unwrap();
    state.place_object(cell(0, 0), &ObjectType::npc("goomba")).unwrap();
    state.select_all();
    state.cut_selection().unwrap();
    state.paste(cell(4, 4)).unwrap();

    while state.can_undo() {
        state.undo().unwrap();
    }
    assert_eq!(state.get_level().current_section().layers(), start.current_section().layers());
    assert_eq!(state.redo_stack_len(), 7);
}

// ============================================================================
// Truncation
// ============================================================================

#[test]
fn test_new_edit_clears_redo() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.undo().unwrap();
    assert!(state.can_redo());

    state.place_object(cell(1, 0), &ObjectType::tile("brick")).unwrap();
    assert!(!state.can_redo());

    state.redo().unwrap();
    assert_eq!(state.get_cur_layer().len(), 1);
    assert!(state.get_cur_layer().tile_at(cell(0, 0)).is_none());
}

#[test]
fn test_empty_history_is_noop() {
    let mut state = create_test_state(20, 10);
    state.undo().unwrap();
    state.redo().unwrap();
    assert!(!state.is_dirty());
    assert_eq!(state.undo_description(), None);
    assert_eq!(state.redo_description(), None);
}

#[test]
fn test_descriptions() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::npc("goomba")).unwrap();
    assert_eq!(state.undo_description(), Some("Place NPC".to_string()));
    state.fill(cell(2, 2), &ObjectType::tile("ground")).unwrap();
    assert_eq!(state.undo_description(), Some("Fill".to_string()));
    state.undo().unwrap();
    assert_eq!(state.redo_description(), Some("Fill".to_string()));
}

// ============================================================================
// Locked layers
// ============================================================================

#[test]
fn test_undo_blocked_by_lock() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.set_layer_locked(0, true).unwrap();

    state.undo().unwrap();
    assert_eq!(state.get_cur_layer().len(), 1);
    assert_eq!(state.undo_stack_len(), 1);
    assert_eq!(state.redo_stack_len(), 0);

    state.set_layer_locked(0, false).unwrap();
    state.undo().unwrap();
    assert!(state.get_cur_layer().is_empty());
}

#[test]
fn test_redo_blocked_by_lock() {
    let mut state = create_test_state(20, 10);
    state.fill(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.undo().unwrap();
    state.set_layer_locked(0, true).unwrap();

    state.redo().unwrap();
    assert!(state.get_cur_layer().is_empty());
    assert_eq!(state.redo_stack_len(), 1);
}

#[test]
fn test_lock_on_other_layer_does_not_block() {
    let mut state = create_test_state(20, 10);
    state.place_object(cell(0, 0), &ObjectType::tile("ground")).unwrap();
    state.add_new_layer("Top").unwrap();
    state.set_layer_locked(1, true).unwrap();

    // the add layer entry never touches contents
    state.undo().unwrap();
    assert_eq!(state.get_current_section().layer_count(), 1);
    state.undo().unwrap();
    assert!(state.get_cur_layer().is_empty());
}

// ============================================================================
// Failed replay
// ============================================================================

#[test]
fn test_failed_undo_rolls_back_group() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer("Top").unwrap();
    {
        let mut guard = state.begin_atomic_undo("Draw");
        state.place_object_on(0, cell(1, 1), &ObjectType::tile("ground")).unwrap();
        state.place_object_on(1, cell(2, 2), &ObjectType::tile("brick")).unwrap();
        guard.end();
    }
    let undo_len = state.undo_stack_len();

    // bypasses the history, the group now references a missing layer
    state.get_level_mut().current_section_mut().remove_layer(0).unwrap();

    assert!(state.undo().is_err());
    assert_eq!(state.undo_stack_len(), undo_len);
    assert_eq!(state.redo_stack_len(), 0);
    assert_eq!(state.get_current_section().layer(0).unwrap().len(), 1);
}

#[test]
fn test_failed_redo_rolls_back_group() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer("Top").unwrap();
    {
        let mut guard = state.begin_atomic_undo("Draw");
        state.place_object_on(1, cell(2, 2), &ObjectType::tile("brick")).unwrap();
        state.place_object_on(0, cell(1, 1), &ObjectType::tile("ground")).unwrap();
        guard.end();
    }
    state.undo().unwrap();
    state.get_level_mut().current_section_mut().remove_layer(0).unwrap();

    assert!(state.redo().is_err());
    assert_eq!(state.redo_stack_len(), 1);
    assert!(state.get_current_section().layer(0).unwrap().is_empty());
}

#[test]
fn test_failed_batch_undo_changes_nothing() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer("Top").unwrap();
    state.place_object_on(0, cell(1, 1), &ObjectType::tile("ground")).unwrap();
    state.place_object_on(1, cell(2, 2), &ObjectType::tile("brick")).unwrap();
    assert_eq!(state.clear_all().unwrap(), 2);
    let undo_len = state.undo_stack_len();

    state.get_level_mut().current_section_mut().remove_layer(0).unwrap();

    assert!(state.undo().is_err());
    assert_eq!(state.undo_stack_len(), undo_len);
    assert!(state.get_current_section().layer(0).unwrap().is_empty());
}

// ============================================================================
// Stable references
// ============================================================================

#[test]
fn test_undo_follows_reordered_layer() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer("Top").unwrap();
    state.place_object(cell(2, 2), &ObjectType::tile("brick")).unwrap();

    state.lower_layer(1).unwrap();
    assert_eq!(state.get_current_section().layer(0).unwrap().title(), "Top");

    state.undo().unwrap();
    assert!(state.get_current_section().layer(0).unwrap().is_empty());
    state.redo().unwrap();
    assert_eq!(state.get_current_section().layer(0).unwrap().len(), 1);
}

#[test]
fn test_tiles_stay_unique_under_random_history() {
    let mut state = create_test_state(6, 6);
    let mut seed = 12_345_u64;
    let mut next = |max: u64| {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % max
    };
    let types = [ObjectType::tile("ground"), ObjectType::tile("brick"), ObjectType::npc("goomba")];

    for _ in 0..1500 {
        let position = cell(next(6) as i32, next(6) as i32);
        match next(6) {
            0 => {
                state.erase_object(position).unwrap();
            }
            1 => state.undo().unwrap(),
            2 => state.redo().unwrap(),
            3 => {
                state.fill(position, &types[next(2) as usize]).unwrap();
            }
            _ => {
                state.place_object(position, &types[next(3) as usize]).unwrap();
            }
        }
    }

    let tiles: Vec<_> = state.get_cur_layer().objects().filter(|o| o.kind() == ObjectKind::Tile).collect();
    let positions: HashSet<_> = tiles.iter().map(|t| t.position()).collect();
    assert_eq!(tiles.len(), positions.len());
}
