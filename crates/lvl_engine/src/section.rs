use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Color, EngineError, GridPosition, Layer, LayerId, Result, CELL_SIZE, DEFAULT_BACKGROUND_COLOR};

pub const DEFAULT_SECTION_WIDTH: i32 = 100;
pub const DEFAULT_SECTION_HEIGHT: i32 = 30;

/// Smallest size the properties dialog allows.
pub const MIN_SECTION_WIDTH: i32 = 20;
pub const MIN_SECTION_HEIGHT: i32 = 10;

/// Upper bound for either side of a section in cells.
pub const MAX_SECTION_CELLS: i32 = 65_536;

static NEXT_SECTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(u64);

impl SectionId {
    pub fn next() -> Self {
        SectionId(NEXT_SECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "section#{}", self.0)
    }
}

/// A bounded sub level. Sizes are in cells, layer 0 is the bottom layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    id: SectionId,
    width: i32,
    height: i32,
    layers: Vec<Layer>,
    current_layer: usize,

    pub background_color: Color,
    pub music: u32,
}

impl Default for Section {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_WIDTH, DEFAULT_SECTION_HEIGHT)
    }
}

impl Section {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            id: SectionId::next(),
            width: width.clamp(1, MAX_SECTION_CELLS),
            height: height.clamp(1, MAX_SECTION_CELLS),
            layers: vec![Layer::new("Layer 1")],
            current_layer: 0,
            background_color: DEFAULT_BACKGROUND_COLOR,
            music: 1,
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.clamp(1, MAX_SECTION_CELLS);
        self.height = height.clamp(1, MAX_SECTION_CELLS);
    }

    /// Extent in world units.
    pub fn pixel_width(&self) -> i32 {
        self.width.saturating_mul(CELL_SIZE)
    }

    pub fn pixel_height(&self) -> i32 {
        self.height.saturating_mul(CELL_SIZE)
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        (0..self.pixel_width()).contains(&position.x) && (0..self.pixel_height()).contains(&position.y)
    }

    /// Snaps `position` to its cell and moves it onto the nearest cell inside the section.
    pub fn clamp_position(&self, position: GridPosition) -> GridPosition {
        GridPosition::from_cell(position.col().clamp(0, self.width - 1), position.row().clamp(0, self.height - 1))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    pub fn layer_by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn layer_by_id_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    pub fn current_layer_index(&self) -> usize {
        self.current_layer
    }

    /// Out of range indices are clamped to the top layer.
    pub fn set_current_layer(&mut self, index: usize) {
        self.current_layer = index.min(self.layers.len() - 1);
    }

    pub fn current_layer(&self) -> &Layer {
        &self.layers[self.current_layer]
    }

    pub fn current_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.current_layer]
    }

    /// Title for the next layer created by the user.
    pub fn next_layer_title(&self) -> String {
        format!("Layer {}", self.layers.len() + 1)
    }

    /// Inserts `layer` at `index` (clamped to the top) and returns the index it landed on.
    pub fn insert_layer(&mut self, index: usize, layer: Layer) -> usize {
        let current = self.current_layer().id();
        let index = index.min(self.layers.len());
        self.layers.insert(index, layer);
        self.follow_layer(current);
        index
    }

    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.insert_layer(self.layers.len(), layer)
    }

    /// # Errors
    ///
    /// Fails for out of range indices and for the only layer of the section.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer> {
        if index >= self.layers.len() {
            return Err(EngineError::LayerOutOfRange {
                layer: index,
                max: self.layers.len(),
            });
        }
        if self.layers.len() == 1 {
            return Err(EngineError::LastLayer);
        }
        let current = self.current_layer().id();
        let layer = self.layers.remove(index);
        if !self.follow_layer(current) {
            self.current_layer = index.saturating_sub(1).min(self.layers.len() - 1);
        }
        Ok(layer)
    }

    /// Moves a layer in the stack, the current layer selection follows its layer.
    ///
    /// # Errors
    ///
    /// Fails if either index is out of range.
    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<()> {
        let max = self.layers.len();
        if from >= max || to >= max {
            return Err(EngineError::LayerOutOfRange { layer: from.max(to), max });
        }
        if from == to {
            return Ok(());
        }
        let current = self.current_layer().id();
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.follow_layer(current);
        Ok(())
    }

    fn follow_layer(&mut self, id: LayerId) -> bool {
        if let Some(index) = self.layer_index(id) {
            self.current_layer = index;
            true
        } else {
            false
        }
    }

    pub fn object_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }
}
