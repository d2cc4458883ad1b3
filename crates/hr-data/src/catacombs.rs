//! The catacombs: longer, branchier, and more crowded than the crypt

use hr_core::floor::{DoorLayout, EnemyPoolEntry, FloorConfig, RoomCategory, RoomTemplate, WorldPos};

use crate::spawn_prefab;

pub fn catacombs() -> FloorConfig {
    let mut config = FloorConfig::new("catacombs");

    config.start_room = Some(RoomTemplate::new(
        "collapsed-stair",
        RoomCategory::Start,
        DoorLayout::ALL_SINGLE,
    ));
    config.boss_room = Some(
        RoomTemplate::new("charnel-pit", RoomCategory::Boss, DoorLayout::ALL_DOUBLE)
            .with_difficulty(6)
            .with_prefab(spawn_prefab(&[(0.0, 0.0)])),
    );

    config.normal_rooms = vec![
        RoomTemplate::new("tunnel-junction", RoomCategory::Normal, DoorLayout::ALL_SINGLE)
            .with_weight(5)
            .with_prefab(spawn_prefab(&[(-5.0, 0.0), (5.0, 0.0)])),
        RoomTemplate::new("skull-gallery", RoomCategory::Normal, DoorLayout::new(1, 2, 1, 2))
            .with_weight(2)
            .with_difficulty(2)
            .with_prefab(spawn_prefab(&[(-6.0, 3.0), (0.0, 3.0), (6.0, 3.0)])),
        RoomTemplate::new("flooded-cistern", RoomCategory::Normal, DoorLayout::ALL_DOUBLE)
            .with_difficulty(3)
            .with_depth_range(3, 20)
            .with_prefab(spawn_prefab(&[(-4.0, -4.0), (4.0, 4.0)])),
        RoomTemplate::new("dead-end-tomb", RoomCategory::Normal, DoorLayout::new(0, 0, 1, 0)).with_weight(2),
    ];
    config.special_rooms = vec![RoomTemplate::new("sinkhole", RoomCategory::Normal, DoorLayout::ALL_DOUBLE)];
    config.treasure_rooms = vec![
        RoomTemplate::new("sealed-vault", RoomCategory::Treasure, DoorLayout::ALL_SINGLE),
        RoomTemplate::new("hoard", RoomCategory::Treasure, DoorLayout::ALL_SINGLE).with_depth_range(4, 20),
    ];
    config.shop_rooms = vec![RoomTemplate::new("grave-robber", RoomCategory::Shop, DoorLayout::ALL_SINGLE)];

    config.layout.main_path_length = (6, 9);
    config.layout.max_branches = 3;
    config.layout.branch_length = 2;
    config.layout.cell_spacing = WorldPos::new(28.0, 18.0);

    config.enemies.base_enemy_count = (3, 4);
    config.enemies.additional_enemies_per_depth = 1;
    config.enemies.boss_enemy_count = 2;
    config.enemies.base_difficulty = 3.0;
    config.enemies.difficulty_per_depth = 0.75;
    config.enemies.pool = vec![
        EnemyPoolEntry::new("ghoul", 4, 0.0, 6.0),
        EnemyPoolEntry::new("rat-swarm", 3, 0.0, 8.0),
        EnemyPoolEntry::new("wraith", 2, 4.0, 14.0),
        EnemyPoolEntry::new("crypt-lord", 1, 8.0, 100.0),
    ];
    config
}
