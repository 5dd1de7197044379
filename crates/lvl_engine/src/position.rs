use std::{
    cmp::Ordering,
    hash::Hash,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Edge length of one grid cell in world units.
pub const CELL_SIZE: i32 = 32;

/// Cell aligned world position of a placed object.
///
/// `x`/`y` are world units and always a multiple of [`CELL_SIZE`] for positions
/// produced by the editor; [`GridPosition::col`]/[`GridPosition::row`] give the cell index.
/// Positions read from a file are taken as they are.
#[derive(Copy, Clone, Debug, Default, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl Hash for GridPosition {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        GridPosition { x, y }
    }

    /// Position of the top left corner of cell `(col, row)`, saturating at the `i32` range.
    pub fn from_cell(col: i32, row: i32) -> Self {
        GridPosition {
            x: col.saturating_mul(CELL_SIZE),
            y: row.saturating_mul(CELL_SIZE),
        }
    }

    /// Column index, rounded toward negative infinity.
    pub fn col(&self) -> i32 {
        self.x.div_euclid(CELL_SIZE)
    }

    /// Row index, rounded toward negative infinity.
    pub fn row(&self) -> i32 {
        self.y.div_euclid(CELL_SIZE)
    }

    pub fn is_aligned(&self) -> bool {
        self.x.rem_euclid(CELL_SIZE) == 0 && self.y.rem_euclid(CELL_SIZE) == 0
    }

    /// Snaps to the top left corner of the containing cell.
    pub fn snapped(self) -> Self {
        GridPosition::from_cell(self.col(), self.row())
    }

    pub fn offset_cells(self, cols: i32, rows: i32) -> Self {
        GridPosition {
            x: self.x.saturating_add(cols.saturating_mul(CELL_SIZE)),
            y: self.y.saturating_add(rows.saturating_mul(CELL_SIZE)),
        }
    }

    /// The four edge adjacent cells: up, down, left, right.
    pub fn neighbors(self) -> [GridPosition; 4] {
        [
            self.offset_cells(0, -1),
            self.offset_cells(0, 1),
            self.offset_cells(-1, 0),
            self.offset_cells(1, 0),
        ]
    }
}

impl Add<GridPosition> for GridPosition {
    type Output = GridPosition;

    fn add(self, rhs: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign<GridPosition> for GridPosition {
    fn add_assign(&mut self, rhs: GridPosition) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<GridPosition> for GridPosition {
    type Output = GridPosition;

    fn sub(self, rhs: GridPosition) -> GridPosition {
        GridPosition {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl SubAssign<GridPosition> for GridPosition {
    fn sub_assign(&mut self, rhs: GridPosition) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl PartialEq for GridPosition {
    fn eq(&self, other: &GridPosition) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// row major: sorted tiles are written top to bottom, left to right
impl Ord for GridPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for GridPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for GridPosition {
    fn from(value: (i32, i32)) -> Self {
        GridPosition { x: value.0, y: value.1 }
    }
}

/// Continuous point, used for both screen pixels and world units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Add<Point> for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f32, f32)> for Point {
    fn from(value: (f32, f32)) -> Self {
        Point { x: value.0, y: value.1 }
    }
}

impl From<GridPosition> for Point {
    fn from(value: GridPosition) -> Self {
        Point {
            x: value.x as f32,
            y: value.y as f32,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Extent { width, height }
    }
}

impl From<(f32, f32)> for Extent {
    fn from(value: (f32, f32)) -> Self {
        Extent {
            width: value.0,
            height: value.1,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub start: Point,
    pub size: Extent,
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x:{}, y:{}, width: {}, height: {})", self.start.x, self.start.y, self.size.width, self.size.height)
    }
}

impl Rect {
    pub fn new(start: Point, size: Extent) -> Self {
        Self { start, size }
    }

    pub fn from(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            start: Point::new(x, y),
            size: Extent::new(width, height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.start.x + self.size.width / 2.0, self.start.y + self.size.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.start.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.start.y + self.size.height
    }

    /// True when `other` lies fully inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.start.x <= other.start.x && self.start.y <= other.start.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }
}
