use hashbrown::HashSet;

use hr_core::floor::{
    DoorLayout, EnemyPoolEntry, FloorConfig, RoomCategory, RoomPrefab, RoomTemplate, WorldPos,
};
use hr_core::runtime::{EnemyId, FloorEvent, FloorHost, RoomId, RoomManager, SpawnRequest};

/// Host that hands out sequential enemy ids and records everything
#[derive(Default)]
struct ScriptHost {
    next: EnemyId,
    requests: Vec<SpawnRequest>,
    despawned: Vec<EnemyId>,
    player: WorldPos,
}

impl FloorHost for ScriptHost {
    fn spawn_enemy(&mut self, request: &SpawnRequest) -> Option<EnemyId> {
        self.next = self.next.next();
        self.requests.push(request.clone());
        Some(self.next)
    }

    fn despawn_enemy(&mut self, enemy: EnemyId) {
        self.despawned.push(enemy);
    }

    fn move_player_to(&mut self, position: WorldPos) {
        self.player = position;
    }
}

fn crypt() -> FloorConfig {
    let spawns = RoomPrefab {
        spawn_points: vec![WorldPos::new(-4.0, 2.0), WorldPos::new(4.0, -2.0)],
        ..RoomPrefab::default()
    };
    let mut config = FloorConfig::new("crypt");
    config.start_room = Some(RoomTemplate::new("entry", RoomCategory::Start, DoorLayout::ALL_SINGLE));
    config.boss_room = Some(RoomTemplate::new("tomb", RoomCategory::Boss, DoorLayout::ALL_SINGLE));
    config.normal_rooms = vec![
        RoomTemplate::new("ossuary", RoomCategory::Normal, DoorLayout::ALL_SINGLE).with_prefab(spawns),
        RoomTemplate::new("nave", RoomCategory::Normal, DoorLayout::ALL_DOUBLE).with_difficulty(3),
    ];
    config.treasure_rooms = vec![RoomTemplate::new("reliquary", RoomCategory::Treasure, DoorLayout::ALL_SINGLE)];
    config.enemies.pool = vec![
        EnemyPoolEntry::new("skeleton", 3, 0.0, 4.0),
        EnemyPoolEntry::new("wraith", 1, 2.0, 50.0),
    ];
    config
}

/// Clear the active room, then visit every unvisited neighbor depth first
fn explore(manager: &mut RoomManager<ScriptHost>, visited: &mut HashSet<RoomId>) {
    let Some(here) = manager.current_room_id() else {
        return;
    };
    visited.insert(here);
    for enemy in manager.room(here).map(|r| r.enemies()).unwrap_or_default() {
        assert!(manager.on_enemy_died(enemy));
    }

    let doors = manager.room(here).map(|r| r.doors.clone()).unwrap_or_default();
    for door in doors {
        let Some(partner) = manager.arena().partner(door) else {
            continue;
        };
        let target = manager.arena().door(partner).unwrap().room;
        if visited.contains(&target) {
            continue;
        }

        assert_eq!(manager.enter_connected_room(door, partner), Ok(target));
        assert_eq!(manager.host().player, manager.arena().door(partner).unwrap().entry_point);
        explore(manager, visited);
        assert_eq!(manager.enter_connected_room(partner, door), Ok(here));
    }
}

#[test]
fn test_every_room_reachable_through_doors() {
    for seed in [3, 42, 512, 9001] {
        let mut manager = RoomManager::new(ScriptHost::default(), vec![crypt()]);
        manager.build_floor(0, seed).unwrap();

        let mut visited = HashSet::new();
        explore(&mut manager, &mut visited);
        assert_eq!(visited.len(), manager.arena().room_count(), "seed {}", seed);
        assert!(manager.arena().rooms().iter().all(|r| r.is_cleared()));
    }
}

#[test]
fn test_only_combat_rooms_spawn() {
    let mut manager = RoomManager::new(ScriptHost::default(), vec![crypt()]);
    manager.build_floor(0, 42).unwrap();
    let mut visited = HashSet::new();
    explore(&mut manager, &mut visited);

    let mut boss_requests = 0;
    for request in &manager.host().requests {
        let room = manager.room(request.room).unwrap();
        assert!(room.category.spawns_encounter());
        assert!(request.prefab == "skeleton" || request.prefab == "wraith");
        if room.category == RoomCategory::Boss {
            boss_requests += 1;
        }
    }
    assert_eq!(boss_requests, 1);

    let events = manager.take_events();
    let cleared: Vec<RoomId> = events
        .iter()
        .filter_map(|e| match e {
            FloorEvent::RoomCleared { room } => Some(*room),
            _ => None,
        })
        .collect();
    let combat_rooms = manager
        .arena()
        .rooms()
        .iter()
        .filter(|r| r.category.spawns_encounter())
        .count();
    assert_eq!(cleared.len(), combat_rooms);
}

#[test]
fn test_encounters_repeat_for_same_seed() {
    let run = |seed| {
        let mut manager = RoomManager::new(ScriptHost::default(), vec![crypt()]);
        manager.build_floor(0, seed).unwrap();
        let mut visited = HashSet::new();
        explore(&mut manager, &mut visited);
        manager.into_host().requests
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_seed_zero_picks_fresh_seed() {
    let mut manager = RoomManager::new(ScriptHost::default(), vec![crypt()]);
    let seed = manager.build_floor(0, 0).unwrap();
    assert_ne!(seed, 0);
    assert_eq!(manager.seed(), seed);
}

#[test]
fn test_rebuild_hands_back_live_enemies() {
    let mut manager = RoomManager::new(ScriptHost::default(), vec![crypt()]);
    manager.build_floor(0, 42).unwrap();

    let start = manager.current_room_id().unwrap();
    let door = manager
        .room(start)
        .unwrap()
        .doors
        .iter()
        .copied()
        .find(|&d| manager.arena().is_navigable(d))
        .unwrap();
    let room = manager.on_door_entered(door).unwrap();
    let mut alive = manager.room(room).unwrap().enemies();

    manager.build_floor(1, 42).unwrap();
    let mut despawned = manager.host().despawned.clone();
    despawned.sort();
    alive.sort();
    assert_eq!(despawned, alive);
    assert!(manager.room(room).is_none());
    assert!(manager.arena().live_enemies().is_empty());
}
