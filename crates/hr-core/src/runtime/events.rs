//! Notifications raised by the room manager
//!
//! Events queue up inside the manager until a listener drains them with
//! [`RoomManager::take_events`](super::RoomManager::take_events).

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{DoorId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorEvent {
    /// A new floor was assembled and wired
    FloorBuilt { floor_index: u32, seed: u64, rooms: usize },
    /// The player is now in this room
    RoomActivated { room: RoomId },
    /// The last tracked enemy of a room is gone
    RoomCleared { room: RoomId },
    DoorsLocked { room: RoomId, doors: Vec<DoorId> },
    DoorsUnlocked { room: RoomId, doors: Vec<DoorId> },
}

impl fmt::Display for FloorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorEvent::FloorBuilt { floor_index, seed, rooms } => {
                write!(f, "floor {} built from seed {} with {} rooms", floor_index, seed, rooms)
            }
            FloorEvent::RoomActivated { room } => write!(f, "entered room {}", room),
            FloorEvent::RoomCleared { room } => write!(f, "room {} cleared", room),
            FloorEvent::DoorsLocked { room, doors } => {
                write!(f, "{} doors of room {} locked", doors.len(), room)
            }
            FloorEvent::DoorsUnlocked { room, doors } => {
                write!(f, "{} doors of room {} unlocked", doors.len(), room)
            }
        }
    }
}
