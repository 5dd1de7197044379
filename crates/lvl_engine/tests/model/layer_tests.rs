use std::collections::HashSet;

use lvl_engine::{fill_region, GridPosition, Layer, ObjectKind, ObjectType, Section};

/// Small deterministic generator, keeps the test reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) % max
    }
}

#[test]
fn test_tile_positions_stay_unique_under_random_edits() {
    let mut layer = Layer::new("Layer 1");
    let mut rng = Lcg(7);
    let types = [ObjectType::tile("ground"), ObjectType::tile("brick"), ObjectType::npc("goomba"), ObjectType::background_object("bush")];

    for _ in 0..2000 {
        let position = GridPosition::from_cell(rng.next(6) as i32, rng.next(6) as i32);
        if rng.next(3) == 0 {
            layer.erase(position);
        } else {
            layer.place(position, &types[rng.next(types.len() as u64) as usize]);
        }
    }

    let tiles: Vec<_> = layer.objects().filter(|o| o.kind() == ObjectKind::Tile).collect();
    let positions: HashSet<_> = tiles.iter().map(|t| t.position()).collect();
    assert_eq!(tiles.len(), positions.len());
}

#[test]
fn test_fill_region_is_maximal_connected_region() {
    // G G . G
    // . G . G
    // G G G G
    let mut section = Section::new(4, 3);
    let ground = ObjectType::tile("ground");
    for (col, row) in [(0, 0), (1, 0), (3, 0), (1, 1), (3, 1), (0, 2), (1, 2), (2, 2), (3, 2)] {
        section.current_layer_mut().place(GridPosition::from_cell(col, row), &ground);
    }

    let region: HashSet<_> = fill_region(&section, section.current_layer(), GridPosition::from_cell(0, 0), &ObjectType::tile("ice"))
        .into_iter()
        .collect();
    assert_eq!(region.len(), 9);

    let empty: HashSet<_> = fill_region(&section, section.current_layer(), GridPosition::from_cell(2, 0), &ObjectType::tile("ice"))
        .into_iter()
        .collect();
    let expected: HashSet<_> = [GridPosition::from_cell(2, 0), GridPosition::from_cell(2, 1)].into_iter().collect();
    assert_eq!(empty, expected);
}

#[test]
fn test_fill_seed_is_snapped_to_cell() {
    let section = Section::new(3, 3);
    let region = fill_region(&section, section.current_layer(), GridPosition::new(40, 70), &ObjectType::tile("dirt"));
    assert_eq!(region.len(), 9);
    assert_eq!(region[0], GridPosition::from_cell(1, 2));
}
