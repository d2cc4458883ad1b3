//! Room runtime
//!
//! Live rooms and doors of the current floor, door wiring, and the manager
//! that reacts to the player and to enemy deaths.

mod arena;
mod door;
mod events;
mod host;
mod ids;
mod manager;
mod room;
mod wiring;

pub use arena::FloorArena;
pub use door::RoomDoor;
pub use events::FloorEvent;
pub use host::{FloorHost, SpawnRequest};
pub use ids::{DoorId, EnemyId, RoomId};
pub use manager::RoomManager;
pub use room::{Room, RoomState};
pub use wiring::{WiringReport, wire_doors};
