//! Scripted walk-through of a built floor
//!
//! Stands in for the game engine: every requested enemy spawns, the player
//! kills everything in each room on arrival, and the walk visits every
//! room reachable through doors, depth first.

use hashbrown::HashSet;
use log::{debug, info};

use hr_core::floor::WorldPos;
use hr_core::runtime::{EnemyId, FloorEvent, FloorHost, RoomId, RoomManager, SpawnRequest};

/// Engine stand-in that accepts every spawn
#[derive(Debug, Default)]
pub struct ScriptedHost {
    next_enemy: EnemyId,
    pub spawned: Vec<SpawnRequest>,
    pub despawned: usize,
    pub player: WorldPos,
}

impl FloorHost for ScriptedHost {
    fn spawn_enemy(&mut self, request: &SpawnRequest) -> Option<EnemyId> {
        self.next_enemy = self.next_enemy.next();
        debug!("spawn {} '{}' at {}", self.next_enemy, request.prefab, request.position);
        self.spawned.push(request.clone());
        Some(self.next_enemy)
    }

    fn despawn_enemy(&mut self, enemy: EnemyId) {
        debug!("despawn {}", enemy);
        self.despawned += 1;
    }

    fn move_player_to(&mut self, position: WorldPos) {
        self.player = position;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkSummary {
    pub rooms_visited: usize,
    pub enemies_killed: usize,
    pub doors_used: usize,
    pub rooms_cleared: usize,
}

/// Visit every reachable room of the current floor, printing events
pub fn walk_floor(manager: &mut RoomManager<ScriptedHost>) -> WalkSummary {
    let mut summary = WalkSummary::default();
    let mut visited = HashSet::new();
    report_events(manager, &mut summary);
    visit(manager, &mut visited, &mut summary);
    summary.rooms_visited = visited.len();
    info!(
        "walk finished: {} rooms, {} enemies, {} doors",
        summary.rooms_visited, summary.enemies_killed, summary.doors_used
    );
    summary
}

fn visit(manager: &mut RoomManager<ScriptedHost>, visited: &mut HashSet<RoomId>, summary: &mut WalkSummary) {
    let Some(here) = manager.current_room_id() else {
        return;
    };
    visited.insert(here);

    let enemies = manager.room(here).map(|r| r.enemies()).unwrap_or_default();
    for enemy in enemies {
        if manager.on_enemy_died(enemy) {
            summary.enemies_killed += 1;
        }
    }
    report_events(manager, summary);

    let doors = manager.room(here).map(|r| r.doors.clone()).unwrap_or_default();
    for door in doors {
        let Some(partner) = manager.arena().partner(door) else {
            continue;
        };
        let Some(target) = manager.arena().door(partner).map(|d| d.room) else {
            continue;
        };
        if visited.contains(&target) {
            continue;
        }

        match manager.enter_connected_room(door, partner) {
            Ok(_) => summary.doors_used += 1,
            Err(err) => {
                println!("  blocked: {}", err);
                continue;
            }
        }
        report_events(manager, summary);
        visit(manager, visited, summary);

        // come back the way we came
        if manager.enter_connected_room(partner, door).is_ok() {
            summary.doors_used += 1;
        }
        manager.take_events();
    }
}

fn report_events(manager: &mut RoomManager<ScriptedHost>, summary: &mut WalkSummary) {
    for event in manager.take_events() {
        if let FloorEvent::RoomCleared { .. } = event {
            summary.rooms_cleared += 1;
        }
        let label = match &event {
            FloorEvent::RoomActivated { room } => manager
                .room(*room)
                .map(|r| format!("{} ({} at {})", event, r.category, r.pos)),
            _ => None,
        };
        println!("  {}", label.unwrap_or_else(|| event.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_visits_every_room() {
        let mut manager = RoomManager::new(ScriptedHost::default(), hr_data::builtin_floors());
        manager.build_floor(1, 1234).unwrap();

        let summary = walk_floor(&mut manager);
        assert_eq!(summary.rooms_visited, manager.arena().room_count());
        assert_eq!(summary.enemies_killed, manager.host().spawned.len());
        assert!(summary.enemies_killed > 0);
        assert_eq!(summary.doors_used, 2 * (summary.rooms_visited - 1));
    }
}
