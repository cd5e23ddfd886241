use std::fmt;

use serde::{Deserialize, Serialize};
use stattrak_core::LoreHolder;
use uuid::Uuid;

/// World position of a block.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Identity of a logical occurrence, stable across redeliveries.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum OccurrenceKey {
    /// The entity that died.
    Entity(Uuid),
    /// The block that was broken.
    Block(BlockPos),
}

/// Discriminant of [`Occurrence`], used for handler dispatch.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum OccurrenceKind {
    EntityDied,
    BlockBroken,
    EntityDamaged,
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OccurrenceKind::EntityDied => "entity_died",
            OccurrenceKind::BlockBroken => "block_broken",
            OccurrenceKind::EntityDamaged => "entity_damaged",
        };
        write!(f, "{}", label)
    }
}

/// One notification from the host, with mutable access to the objects whose
/// statistics it may change.
pub enum Occurrence<'a> {
    /// An entity died. `weapon` is the killer's main-hand object, or `None`
    /// when there was no killer.
    EntityDied {
        entity: Uuid,
        weapon: Option<&'a mut dyn LoreHolder>,
    },

    /// A block was broken with `tool` in the breaker's main hand.
    BlockBroken {
        position: BlockPos,
        tool: &'a mut dyn LoreHolder,
    },

    /// An entity took `amount` damage while wearing `armor`.
    ///
    /// Every damage instance is distinct, so these carry no dedup key.
    EntityDamaged {
        victim: Uuid,
        amount: f64,
        armor: Vec<&'a mut dyn LoreHolder>,
    },
}

impl Occurrence<'_> {
    pub fn kind(&self) -> OccurrenceKind {
        match self {
            Occurrence::EntityDied { .. } => OccurrenceKind::EntityDied,
            Occurrence::BlockBroken { .. } => OccurrenceKind::BlockBroken,
            Occurrence::EntityDamaged { .. } => OccurrenceKind::EntityDamaged,
        }
    }

    /// Dedup key, if this kind of occurrence can be redelivered.
    pub fn key(&self) -> Option<OccurrenceKey> {
        match self {
            Occurrence::EntityDied { entity, .. } => Some(OccurrenceKey::Entity(*entity)),
            Occurrence::BlockBroken { position, .. } => Some(OccurrenceKey::Block(*position)),
            Occurrence::EntityDamaged { .. } => None,
        }
    }
}
