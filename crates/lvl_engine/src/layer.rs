use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{GridPosition, ObjectId, ObjectKind, ObjectType, PlacedObject};

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable layer identity. Stays valid when layers get reordered, removed and restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub fn next() -> Self {
        LayerId(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    pub title: String,
    pub is_visible: bool,
    pub is_locked: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            title: String::new(),
            is_visible: true,
            is_locked: false,
        }
    }
}

/// One stack level of a section.
///
/// Tiles are unique per cell and kept in row major order, background objects and
/// NPCs may share cells and keep their insertion order.
/// Every mutating call is a no-op while the layer is locked.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    pub properties: Properties,

    tiles: BTreeMap<GridPosition, PlacedObject>,
    background_objects: Vec<PlacedObject>,
    npcs: Vec<PlacedObject>,
}

impl Layer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: LayerId::next(),
            properties: Properties {
                title: title.into(),
                ..Default::default()
            },
            tiles: BTreeMap::new(),
            background_objects: Vec::new(),
            npcs: Vec::new(),
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.properties.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.properties.title = title.into();
    }

    pub fn is_visible(&self) -> bool {
        self.properties.is_visible
    }

    pub fn set_visible(&mut self, is_visible: bool) {
        self.properties.is_visible = is_visible;
    }

    pub fn is_locked(&self) -> bool {
        self.properties.is_locked
    }

    pub fn set_locked(&mut self, is_locked: bool) {
        self.properties.is_locked = is_locked;
    }

    /// Places a new object. Returns `None` if the layer is locked or a tile is placed on an occupied cell.
    pub fn place(&mut self, position: GridPosition, object_type: &ObjectType) -> Option<PlacedObject> {
        let object = PlacedObject::new(object_type.clone(), position);
        if self.insert_object(object.clone()) {
            Some(object)
        } else {
            None
        }
    }

    /// Removes the occupant of `position`: the tile, otherwise the first NPC, otherwise the first background object.
    pub fn erase(&mut self, position: GridPosition) -> Option<PlacedObject> {
        if self.is_locked() {
            return None;
        }
        if let Some(tile) = self.tiles.remove(&position) {
            return Some(tile);
        }
        if let Some(i) = self.npcs.iter().position(|npc| npc.position() == position) {
            return Some(self.npcs.remove(i));
        }
        if let Some(i) = self.background_objects.iter().position(|bgo| bgo.position() == position) {
            return Some(self.background_objects.remove(i));
        }
        None
    }

    /// Inserts an existing object keeping its identity.
    /// Returns false if the layer is locked or a tile already occupies the cell.
    pub fn insert_object(&mut self, object: PlacedObject) -> bool {
        if self.is_locked() {
            return false;
        }
        match object.kind() {
            ObjectKind::Tile => {
                if self.tiles.contains_key(&object.position()) {
                    return false;
                }
                self.tiles.insert(object.position(), object);
            }
            ObjectKind::BackgroundObject => self.background_objects.push(object),
            ObjectKind::Npc => self.npcs.push(object),
        }
        true
    }

    /// Removes the object with the given identity, `None` if absent or locked.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<PlacedObject> {
        if self.is_locked() {
            return None;
        }
        if let Some(position) = self.tiles.values().find(|tile| tile.id() == id).map(PlacedObject::position) {
            return self.tiles.remove(&position);
        }
        if let Some(i) = self.npcs.iter().position(|npc| npc.id() == id) {
            return Some(self.npcs.remove(i));
        }
        if let Some(i) = self.background_objects.iter().position(|bgo| bgo.id() == id) {
            return Some(self.background_objects.remove(i));
        }
        None
    }

    /// Removes everything, returns the removed objects (empty if locked).
    pub fn clear(&mut self) -> Vec<PlacedObject> {
        if self.is_locked() {
            return Vec::new();
        }
        let mut removed: Vec<PlacedObject> = std::mem::take(&mut self.tiles).into_values().collect();
        removed.append(&mut self.background_objects);
        removed.append(&mut self.npcs);
        removed
    }

    pub fn tile_at(&self, position: GridPosition) -> Option<&PlacedObject> {
        self.tiles.get(&position)
    }

    /// Topmost object at `position`, using the same preference order as [`Layer::erase`].
    pub fn object_at(&self, position: GridPosition) -> Option<&PlacedObject> {
        self.tiles
            .get(&position)
            .or_else(|| self.npcs.iter().find(|npc| npc.position() == position))
            .or_else(|| self.background_objects.iter().find(|bgo| bgo.position() == position))
    }

    pub fn find(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects().find(|object| object.id() == id)
    }

    /// Tiles in row major order.
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedObject> {
        self.tiles.values()
    }

    pub fn background_objects(&self) -> &[PlacedObject] {
        &self.background_objects
    }

    pub fn npcs(&self) -> &[PlacedObject] {
        &self.npcs
    }

    /// Objects of one kind, in file order.
    pub fn objects_of(&self, kind: ObjectKind) -> Box<dyn Iterator<Item = &PlacedObject> + '_> {
        match kind {
            ObjectKind::Tile => Box::new(self.tiles.values()),
            ObjectKind::BackgroundObject => Box::new(self.background_objects.iter()),
            ObjectKind::Npc => Box::new(self.npcs.iter()),
        }
    }

    /// All objects: tiles, background objects, NPCs.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.tiles.values().chain(self.background_objects.iter()).chain(self.npcs.iter())
    }

    pub fn len(&self) -> usize {
        self.tiles.len() + self.background_objects.len() + self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
