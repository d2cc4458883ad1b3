//! The crypt: the first floor
//!
//! Short paths, few branches, undead that scale gently with depth.

use hr_core::floor::{DoorLayout, EnemyPoolEntry, FloorConfig, RoomCategory, RoomTemplate};

use crate::spawn_prefab;

pub fn crypt() -> FloorConfig {
    let mut config = FloorConfig::new("crypt");

    config.start_room = Some(RoomTemplate::new(
        "crypt-entrance",
        RoomCategory::Start,
        DoorLayout::ALL_SINGLE,
    ));
    config.boss_room = Some(
        RoomTemplate::new("bone-throne", RoomCategory::Boss, DoorLayout::ALL_SINGLE)
            .with_difficulty(4)
            .with_prefab(spawn_prefab(&[(0.0, 3.0)])),
    );

    config.normal_rooms = vec![
        RoomTemplate::new("ossuary", RoomCategory::Normal, DoorLayout::ALL_SINGLE)
            .with_weight(4)
            .with_prefab(spawn_prefab(&[(-6.0, 3.0), (6.0, 3.0), (0.0, -3.0)])),
        RoomTemplate::new("burial-hall", RoomCategory::Normal, DoorLayout::new(0, 2, 0, 2))
            .with_weight(2)
            .with_prefab(spawn_prefab(&[(-4.0, 0.0), (4.0, 0.0)])),
        RoomTemplate::new("stair-well", RoomCategory::Normal, DoorLayout::new(2, 0, 2, 0))
            .with_weight(2)
            .with_prefab(spawn_prefab(&[(0.0, 4.0), (0.0, -4.0)])),
        RoomTemplate::new("chapel", RoomCategory::Normal, DoorLayout::ALL_DOUBLE)
            .with_difficulty(2)
            .with_depth_range(2, 20)
            .with_prefab(spawn_prefab(&[(-5.0, 2.0), (5.0, 2.0), (-5.0, -2.0), (5.0, -2.0)])),
        RoomTemplate::new("niche", RoomCategory::Normal, DoorLayout::new(1, 0, 0, 0)).with_weight(3),
    ];
    config.special_rooms = vec![RoomTemplate::new(
        "collapsed-crossing",
        RoomCategory::Normal,
        DoorLayout::ALL_DOUBLE,
    )];
    config.treasure_rooms = vec![RoomTemplate::new("reliquary", RoomCategory::Treasure, DoorLayout::ALL_SINGLE)];
    config.shop_rooms = vec![RoomTemplate::new("bone-merchant", RoomCategory::Shop, DoorLayout::ALL_SINGLE)];

    config.layout.main_path_length = (4, 6);
    config.layout.max_branches = 2;
    config.layout.branch_length = 1;

    config.enemies.base_enemy_count = (2, 3);
    config.enemies.base_difficulty = 1.0;
    config.enemies.difficulty_per_depth = 0.5;
    config.enemies.pool = vec![
        EnemyPoolEntry::new("skeleton", 5, 0.0, 4.0),
        EnemyPoolEntry::new("ghoul", 3, 1.5, 6.0),
        EnemyPoolEntry::new("wraith", 2, 3.0, 12.0),
        EnemyPoolEntry::new("bone-knight", 1, 5.0, 100.0),
    ];
    config
}
