//! Room instances

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{DoorId, EnemyId, RoomId};
use crate::floor::{GridPos, RoomCategory, TemplateId, WorldPos};

/// Whether the player is in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomState {
    #[default]
    Inactive,
    Active,
}

/// A live room of the current floor
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub pos: GridPos,
    /// World position of the room center
    pub origin: WorldPos,
    pub template: TemplateId,
    pub category: RoomCategory,
    pub depth: u32,
    pub doors: Vec<DoorId>,
    /// Enemy spawn points in world space
    pub spawn_points: Vec<WorldPos>,
    pub player_spawn: WorldPos,
    pub state: RoomState,
    /// The encounter has been spawned; it never spawns twice
    pub encounter_spawned: bool,
    enemies: HashSet<EnemyId>,
}

impl Room {
    pub fn new(
        id: RoomId,
        pos: GridPos,
        origin: WorldPos,
        template: TemplateId,
        category: RoomCategory,
        depth: u32,
    ) -> Self {
        Self {
            id,
            pos,
            origin,
            template,
            category,
            depth,
            doors: Vec::new(),
            spawn_points: Vec::new(),
            player_spawn: origin,
            state: RoomState::Inactive,
            encounter_spawned: false,
            enemies: HashSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == RoomState::Active
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn has_enemy(&self, enemy: EnemyId) -> bool {
        self.enemies.contains(&enemy)
    }

    /// Live enemies, sorted by id
    pub fn enemies(&self) -> Vec<EnemyId> {
        let mut enemies: Vec<EnemyId> = self.enemies.iter().copied().collect();
        enemies.sort();
        enemies
    }

    /// Returns false when the enemy was already tracked
    pub(crate) fn add_enemy(&mut self, enemy: EnemyId) -> bool {
        self.enemies.insert(enemy)
    }

    /// Returns false when the enemy was not tracked
    pub(crate) fn remove_enemy(&mut self, enemy: EnemyId) -> bool {
        self.enemies.remove(&enemy)
    }

    /// Position of the `n`th spawned enemy: spawn points in turn, the room
    /// center when there are none
    pub fn spawn_position(&self, n: usize) -> WorldPos {
        if self.spawn_points.is_empty() {
            self.origin
        } else {
            self.spawn_points[n % self.spawn_points.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(
            RoomId::new(1, 0),
            GridPos::ZERO,
            WorldPos::new(5.0, 5.0),
            TemplateId::START,
            RoomCategory::Normal,
            0,
        )
    }

    #[test]
    fn test_cleared_tracks_enemy_set() {
        let mut room = room();
        assert!(room.is_cleared());
        assert!(room.add_enemy(EnemyId(3)));
        assert!(!room.add_enemy(EnemyId(3)));
        assert!(!room.is_cleared());
        assert!(room.remove_enemy(EnemyId(3)));
        assert!(!room.remove_enemy(EnemyId(3)));
        assert!(room.is_cleared());
    }

    #[test]
    fn test_spawn_positions_cycle() {
        let mut room = room();
        assert_eq!(room.spawn_position(4), WorldPos::new(5.0, 5.0));

        room.spawn_points = vec![WorldPos::new(1.0, 0.0), WorldPos::new(2.0, 0.0)];
        assert_eq!(room.spawn_position(0), WorldPos::new(1.0, 0.0));
        assert_eq!(room.spawn_position(3), WorldPos::new(2.0, 0.0));
    }
}
