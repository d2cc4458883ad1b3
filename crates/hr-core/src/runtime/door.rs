//! Door instances

use serde::{Deserialize, Serialize};

use super::{DoorId, RoomId};
use crate::floor::{Direction, DoorPlacement, GridPos, WorldPos};

/// A physical doorway of a live room
///
/// Links to a partner door are kept by the arena, not here. A fresh door
/// is locked and hidden until wiring gives it a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDoor {
    pub id: DoorId,
    pub room: RoomId,
    pub direction: Direction,
    /// Grid offset of the room this door leads to
    pub target_offset: GridPos,
    /// World position of the doorway
    pub position: WorldPos,
    /// World position a player arriving through this door is placed at
    pub entry_point: WorldPos,
    pub locked: bool,
    pub visible: bool,
}

impl RoomDoor {
    /// Instantiate a prefab doorway for a room whose center is `origin`
    pub fn from_placement(id: DoorId, room: RoomId, origin: WorldPos, placement: &DoorPlacement) -> Self {
        Self {
            id,
            room,
            direction: placement.direction,
            target_offset: placement.target_offset(),
            position: origin + placement.position,
            entry_point: origin + placement.entry_point(),
            locked: true,
            visible: false,
        }
    }

    /// Leads back into its own cell
    pub fn is_self_referential(&self) -> bool {
        self.target_offset.is_zero()
    }

    /// Coordinate along the wall, used to pair doors facing each other
    pub(crate) fn wall_coordinate(&self) -> f32 {
        let offset = self.target_offset;
        if offset.x.abs() >= offset.y.abs() {
            self.position.y
        } else {
            self.position.x
        }
    }
}
