//! The sanctum: a fixed five-room floor
//!
//! Placed as authored whenever a theme has no templates to generate from.

use hr_core::floor::{
    AuthoredFloor, AuthoredRoom, DoorLayout, EnemyPoolEntry, FloorConfig, GridPos, PoolKind, RoomCategory,
    RoomTemplate, TemplateId,
};

use crate::spawn_prefab;

pub fn sanctum() -> AuthoredFloor {
    let mut config = FloorConfig::new("sanctum");
    config.start_room = Some(RoomTemplate::new("vestibule", RoomCategory::Start, DoorLayout::ALL_SINGLE));
    config.boss_room = Some(RoomTemplate::new("altar", RoomCategory::Boss, DoorLayout::ALL_SINGLE).with_difficulty(3));
    config.normal_rooms = vec![
        RoomTemplate::new("cloister", RoomCategory::Normal, DoorLayout::ALL_SINGLE)
            .with_prefab(spawn_prefab(&[(-4.0, 2.0), (4.0, -2.0)])),
    ];
    config.treasure_rooms = vec![RoomTemplate::new("offering-room", RoomCategory::Treasure, DoorLayout::ALL_SINGLE)];
    config.enemies.base_enemy_count = (1, 2);
    config.enemies.pool = vec![EnemyPoolEntry::new("acolyte", 1, 0.0, 100.0)];

    let cloister = TemplateId::new(PoolKind::Normal, 0);
    AuthoredFloor::new(
        config,
        vec![
            AuthoredRoom::new(GridPos::ZERO, TemplateId::START),
            AuthoredRoom::new(GridPos::new(0, 1), cloister),
            AuthoredRoom::new(GridPos::new(1, 1), TemplateId::new(PoolKind::Treasure, 0)),
            AuthoredRoom::new(GridPos::new(0, 2), cloister),
            AuthoredRoom::new(GridPos::new(0, 3), TemplateId::BOSS),
        ],
    )
}
