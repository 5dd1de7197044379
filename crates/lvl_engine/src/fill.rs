use std::collections::{HashSet, VecDeque};

use crate::{GridPosition, Layer, ObjectKind, ObjectType, PlacedObject, Section};

/// Breadth first flood fill over grid cells.
///
/// # Arguments
/// * `start` - Seed cell
/// * `width`, `height` - Bounds of the grid in cells
/// * `value_at` - Function returning the value a cell is compared by
///
/// # Returns
/// The maximal 4-connected region of cells whose value equals the seed value, in visiting order.
/// Every cell is visited at most once.
pub fn flood_fill_points<F, T>(start: GridPosition, width: i32, height: i32, value_at: F) -> Vec<GridPosition>
where
    F: Fn(GridPosition) -> T,
    T: PartialEq,
{
    let mut result = Vec::new();
    let in_bounds = |p: GridPosition| (0..width).contains(&p.col()) && (0..height).contains(&p.row());

    if !in_bounds(start) {
        return result;
    }

    let target_value = value_at(start);

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        result.push(cell);
        for next in cell.neighbors() {
            if !in_bounds(next) || visited.contains(&next) {
                continue;
            }
            // only grow into cells with the seed value
            if value_at(next) == target_value {
                visited.insert(next);
                queue.push_back(next);
            }
        }
    }

    result
}

/// Cells a tile fill of `layer` at `start` would replace with `target`.
///
/// Empty cells compare equal to each other, so filling an empty cell covers the whole empty region.
/// Returns an empty list when the fill is a no-op: locked layer, seed outside the section,
/// a non tile target or a seed that already has the target type.
pub fn fill_region(section: &Section, layer: &Layer, start: GridPosition, target: &ObjectType) -> Vec<GridPosition> {
    if layer.is_locked() || target.kind != ObjectKind::Tile {
        return Vec::new();
    }
    let start = start.snapped();
    if !section.contains(start) {
        return Vec::new();
    }
    let tile_type = |p: GridPosition| layer.tile_at(p).map(PlacedObject::type_name);
    if tile_type(start) == Some(target.name.as_str()) {
        return Vec::new();
    }
    flood_fill_points(start, section.width(), section.height(), tile_type)
}
