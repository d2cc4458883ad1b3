use proptest::prelude::*;

use hr_core::floor::{
    DoorLayout, FloorConfig, PoolKind, RoomCategory, RoomTemplate, TemplateId, generate,
};
use hr_core::runtime::{FloorArena, wire_doors};

/// A catalog mixing single and double doorways, with every forced pool
fn mixed_config(min_path: u32, extra: u32, branches: u32, branch_length: u32) -> FloorConfig {
    let mut config = FloorConfig::new("mixed");
    config.start_room = Some(RoomTemplate::new("start", RoomCategory::Start, DoorLayout::ALL_SINGLE));
    config.boss_room = Some(RoomTemplate::new("boss", RoomCategory::Boss, DoorLayout::ALL_DOUBLE));
    config.normal_rooms = vec![
        RoomTemplate::new("cross", RoomCategory::Normal, DoorLayout::ALL_SINGLE).with_weight(3),
        RoomTemplate::new("hall", RoomCategory::Normal, DoorLayout::new(0, 2, 0, 2)).with_weight(2),
        RoomTemplate::new("gallery", RoomCategory::Normal, DoorLayout::ALL_DOUBLE),
        RoomTemplate::new("shaft", RoomCategory::Normal, DoorLayout::new(2, 0, 2, 0)).with_depth_range(2, 20),
    ];
    config.special_rooms = vec![RoomTemplate::new("junction", RoomCategory::Normal, DoorLayout::ALL_DOUBLE)];
    config.treasure_rooms = vec![RoomTemplate::new("vault", RoomCategory::Treasure, DoorLayout::new(1, 1, 1, 0))];
    config.shop_rooms = vec![RoomTemplate::new("shop", RoomCategory::Shop, DoorLayout::ALL_SINGLE)];
    config.layout.main_path_length = (min_path, min_path + extra);
    config.layout.max_branches = branches;
    config.layout.branch_length = branch_length;
    config
}

fn config_strategy() -> impl Strategy<Value = FloorConfig> {
    (3u32..8, 0u32..5, 0u32..4, 1u32..3)
        .prop_map(|(min_path, extra, branches, length)| mixed_config(min_path, extra, branches, length))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generation_is_deterministic(config in config_strategy(), seed in any::<u64>()) {
        prop_assert_eq!(generate(&config, seed), generate(&config, seed));
    }

    #[test]
    fn prop_floor_is_connected(config in config_strategy(), seed in any::<u64>()) {
        let layout = generate(&config, seed);
        prop_assert_eq!(layout.room_count(), layout.order.len());
        prop_assert!(layout.is_connected());
    }

    #[test]
    fn prop_masks_are_symmetric(config in config_strategy(), seed in any::<u64>()) {
        let layout = generate(&config, seed);
        prop_assert!(layout.asymmetric_walls().is_empty());
    }

    #[test]
    fn prop_unique_rooms_placed_once(config in config_strategy(), seed in any::<u64>()) {
        let layout = generate(&config, seed);
        prop_assert_eq!(layout.cells_with(TemplateId::START), vec![layout.start]);
        prop_assert_eq!(layout.cells_with(TemplateId::BOSS), vec![layout.boss]);
        prop_assert!(layout.cells_with(TemplateId::new(PoolKind::Treasure, 0)).len() <= 1);
        prop_assert!(layout.cells_with(TemplateId::new(PoolKind::Shop, 0)).len() <= 1);
    }

    #[test]
    fn prop_no_dangling_doors(config in config_strategy(), seed in any::<u64>()) {
        let layout = generate(&config, seed);
        let mut arena = FloorArena::assemble(1, &layout, &config);
        let report = wire_doors(&mut arena);

        for door in arena.doors() {
            let linked = arena.is_linked(door.id);
            prop_assert!(linked || door.locked);
            prop_assert!(door.locked || linked);
            prop_assert_eq!(linked, door.visible);
        }
        prop_assert_eq!(report.orphan_doors.len() + 2 * report.linked_pairs, arena.door_count());

        // every realized doorway has a physical door pair behind it
        let realized: u32 = layout.order.iter().map(|&pos| layout.door_mask(pos).total()).sum();
        prop_assert_eq!(realized as usize, 2 * report.linked_pairs);
    }
}
