//! Static name <-> file id tables, one per [`ObjectKind`].
//!
//! Ids are only unique within a kind (`coin`, `tree` and `flower` all use id 10).

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ObjectKind;

pub const TILE_IDS: [(&str, u32); 15] = [
    ("ground", 1),
    ("grass", 2),
    ("sand", 3),
    ("dirt", 4),
    ("brick", 45),
    ("question", 34),
    ("pipe_vertical", 112),
    ("pipe_horizontal", 113),
    ("platform", 159),
    ("coin", 10),
    ("bridge", 47),
    ("stone", 48),
    ("ice", 55),
    ("mushroom_platform", 91),
    ("pswitch", 60),
];

pub const BACKGROUND_OBJECT_IDS: [(&str, u32); 9] = [
    ("cloud", 5),
    ("bush", 6),
    ("hill", 7),
    ("fence", 8),
    ("bush_3", 9),
    ("tree", 10),
    ("castle", 11),
    ("waterfall", 12),
    ("sign", 13),
];

pub const NPC_IDS: [(&str, u32); 19] = [
    ("goomba", 1),
    ("koopa_green", 2),
    ("koopa_red", 3),
    ("paratroopa_green", 4),
    ("paratroopa_red", 5),
    ("piranha", 6),
    ("hammer_bro", 7),
    ("lakitu", 8),
    ("mushroom", 9),
    ("flower", 10),
    ("star", 11),
    ("1up", 12),
    ("buzzy", 13),
    ("spiny", 14),
    ("cheep", 15),
    ("blooper", 16),
    ("thwomp", 17),
    ("bowser", 18),
    ("boo", 19),
];

pub struct TypeTable {
    entries: &'static [(&'static str, u32)],
    by_name: HashMap<&'static str, u32>,
    by_id: HashMap<u32, &'static str>,
}

impl TypeTable {
    fn new(entries: &'static [(&'static str, u32)]) -> Self {
        Self {
            entries,
            by_name: entries.iter().copied().collect(),
            by_id: entries.iter().map(|(name, id)| (*id, *name)).collect(),
        }
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: u32) -> Option<&'static str> {
        self.by_id.get(&id).copied()
    }

    /// Id used when a name has no table entry.
    pub fn fallback_id(&self) -> u32 {
        self.entries[0].1
    }

    /// Names in palette order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

lazy_static! {
    static ref TILE_TABLE: TypeTable = TypeTable::new(&TILE_IDS);
    static ref BACKGROUND_OBJECT_TABLE: TypeTable = TypeTable::new(&BACKGROUND_OBJECT_IDS);
    static ref NPC_TABLE: TypeTable = TypeTable::new(&NPC_IDS);
}

pub fn table(kind: ObjectKind) -> &'static TypeTable {
    match kind {
        ObjectKind::Tile => &TILE_TABLE,
        ObjectKind::BackgroundObject => &BACKGROUND_OBJECT_TABLE,
        ObjectKind::Npc => &NPC_TABLE,
    }
}

pub fn id_for(kind: ObjectKind, name: &str) -> Option<u32> {
    table(kind).id(name)
}

pub fn name_for(kind: ObjectKind, id: u32) -> Option<&'static str> {
    table(kind).name(id)
}

/// Finds the kind a palette name belongs to. Tiles win over NPCs, NPCs over background objects.
pub fn kind_of(name: &str) -> Option<ObjectKind> {
    [ObjectKind::Tile, ObjectKind::Npc, ObjectKind::BackgroundObject]
        .into_iter()
        .find(|kind| table(*kind).id(name).is_some())
}
