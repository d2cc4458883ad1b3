//! The game engine side of the room runtime

use serde::{Deserialize, Serialize};

use super::{EnemyId, RoomId};
use crate::floor::WorldPos;

/// One enemy the manager wants placed in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub room: RoomId,
    /// Enemy prefab name from the floor's enemy pool
    pub prefab: String,
    pub position: WorldPos,
    pub difficulty: f32,
}

/// Services the room manager needs from the engine
///
/// The manager owns its host; nothing is reached through globals.
pub trait FloorHost {
    /// Create an enemy. Returning `None` declines the request and the room
    /// simply has one enemy fewer.
    fn spawn_enemy(&mut self, request: &SpawnRequest) -> Option<EnemyId>;

    /// Remove an enemy that is still alive when its floor is torn down
    fn despawn_enemy(&mut self, enemy: EnemyId);

    /// Teleport the player
    fn move_player_to(&mut self, position: WorldPos);
}

impl<H: FloorHost + ?Sized> FloorHost for &mut H {
    fn spawn_enemy(&mut self, request: &SpawnRequest) -> Option<EnemyId> {
        (**self).spawn_enemy(request)
    }

    fn despawn_enemy(&mut self, enemy: EnemyId) {
        (**self).despawn_enemy(enemy)
    }

    fn move_player_to(&mut self, position: WorldPos) {
        (**self).move_player_to(position)
    }
}
