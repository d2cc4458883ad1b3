//! Error types
//!
//! Generation itself never fails: fallbacks are recorded as warnings on the
//! layout. These errors cover catalog loading, the one unplayable-floor
//! condition, and rejected door transitions.

use thiserror::Error;

use crate::floor::{Direction, PoolKind, RoomCategory};
use crate::runtime::{DoorId, RoomId};

/// Catalog loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{direction} side has {count} doors; at most 2 are supported")]
    DoorCount { direction: Direction, count: u8 },

    #[error("template '{template}' has depth range {min}..={max}")]
    DepthRange { template: String, min: u32, max: u32 },

    #[error("template '{template}' is a {category} room but sits in the {pool} pool")]
    CategoryMismatch {
        template: String,
        category: RoomCategory,
        pool: PoolKind,
    },

    #[error("main path length range {min}..={max} is inverted")]
    PathLength { min: u32, max: u32 },

    #[error("enemy count range {min}..={max} is inverted")]
    EnemyCount { min: u32, max: u32 },

    #[error("enemy pool entry '{prefab}' has difficulty range {min}..={max}")]
    EnemyDifficulty { prefab: String, min: f32, max: f32 },
}

/// A floor that cannot be made playable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("floor {floor_index} has no generated or authored rooms")]
    NoPlayableRooms { floor_index: u32 },
}

/// A door transition the manager refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("door {0} does not belong to the current floor")]
    UnknownDoor(DoorId),

    #[error("door {0} is not linked to another room")]
    NotLinked(DoorId),

    #[error("door {from} is linked to {linked}, not {to}")]
    WrongPartner {
        from: DoorId,
        to: DoorId,
        linked: DoorId,
    },

    #[error("door {0} is locked")]
    Locked(DoorId),

    #[error("door {door} belongs to room {room}, which is not the active room")]
    InactiveRoom { door: DoorId, room: RoomId },
}
