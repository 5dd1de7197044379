use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{type_table, GridPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Terrain, blocks placement of other tiles on the same cell.
    Tile,
    /// Decoration drawn behind everything else.
    BackgroundObject,
    Npc,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Tile, ObjectKind::BackgroundObject, ObjectKind::Npc];
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Tile => write!(f, "Tile"),
            ObjectKind::BackgroundObject => write!(f, "Background Object"),
            ObjectKind::Npc => write!(f, "NPC"),
        }
    }
}

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process wide identity of a placed object, survives moves between collections and undo/redo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind plus palette name, e.g. `Tile/brick` or `Npc/goomba`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectType {
    pub kind: ObjectKind,
    pub name: String,
}

impl ObjectType {
    pub fn new(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self { kind, name: name.into() }
    }

    pub fn tile(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Tile, name)
    }

    pub fn background_object(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::BackgroundObject, name)
    }

    pub fn npc(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Npc, name)
    }

    /// Resolves a bare palette name to its kind, `None` for names no table knows.
    pub fn classify(name: &str) -> Option<Self> {
        type_table::kind_of(name).map(|kind| Self::new(kind, name))
    }

    /// Id written to `.lvl` files, `None` if the name is not in the id table of its kind.
    pub fn file_id(&self) -> Option<u32> {
        type_table::id_for(self.kind, &self.name)
    }

    /// Only tiles collide; coins are collected instead.
    pub fn is_solid(&self) -> bool {
        match self.kind {
            ObjectKind::Tile => self.name != "coin",
            ObjectKind::BackgroundObject | ObjectKind::Npc => false,
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    id: ObjectId,
    object_type: ObjectType,
    position: GridPosition,
}

impl PlacedObject {
    pub fn new(object_type: ObjectType, position: GridPosition) -> Self {
        Self {
            id: ObjectId::next(),
            object_type,
            position,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.object_type.kind
    }

    pub fn type_name(&self) -> &str {
        &self.object_type.name
    }

    pub fn object_type(&self) -> &ObjectType {
        &self.object_type
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn is_solid(&self) -> bool {
        self.object_type.is_solid()
    }
}
