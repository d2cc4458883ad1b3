//! Door compatibility between neighboring templates
//!
//! A template's layout says how many doorways its shape can open on a side.
//! The realized mask of a wall is the smaller of the two capabilities facing
//! each other, so both sides always agree.

use super::{Direction, DoorMask, FloorConfig, GeneratedFloorLayout, GridPos};

/// Doorways the wall between `pos` and its `direction` neighbor can carry
pub fn pair_count(
    layout: &GeneratedFloorLayout,
    config: &FloorConfig,
    pos: GridPos,
    direction: Direction,
) -> u8 {
    let capability = |cell: GridPos, side: Direction| {
        layout
            .template(cell)
            .and_then(|id| config.template(id))
            .map_or(0, |t| t.doors.door_count(side))
    };

    let here = capability(pos, direction);
    let there = capability(pos.step(direction), direction.opposite());
    here.min(there)
}

/// Realized mask of one cell
pub fn door_mask_for(layout: &GeneratedFloorLayout, config: &FloorConfig, pos: GridPos) -> DoorMask {
    let mut mask = DoorMask::empty();
    for direction in Direction::ALL {
        mask.set_pair_count(direction, pair_count(layout, config, pos, direction));
    }
    mask
}

/// Recompute every cell's realized mask from its assigned template
pub fn compute_door_masks(layout: &mut GeneratedFloorLayout, config: &FloorConfig) {
    let current: &GeneratedFloorLayout = layout;
    let masks: Vec<(GridPos, DoorMask)> = current
        .order
        .iter()
        .map(|&pos| (pos, door_mask_for(current, config, pos)))
        .collect();

    layout.door_masks.clear();
    layout.door_masks.extend(masks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::{DoorLayout, PoolKind, RoomCategory, RoomTemplate, TemplateId};

    fn two_cell_floor(west: DoorLayout, east: DoorLayout) -> (GeneratedFloorLayout, FloorConfig) {
        let mut config = FloorConfig::new("mask");
        config.normal_rooms = vec![
            RoomTemplate::new("west", RoomCategory::Normal, west),
            RoomTemplate::new("east", RoomCategory::Normal, east),
        ];

        let mut layout = GeneratedFloorLayout::default();
        let a = GridPos::new(0, 0);
        let b = GridPos::new(1, 0);
        for (i, pos) in [a, b].into_iter().enumerate() {
            layout.order.push(pos);
            layout.depths.insert(pos, i as u32);
            layout.rooms.insert(pos, TemplateId::new(PoolKind::Normal, i as u32));
        }
        (layout, config)
    }

    #[test]
    fn test_pair_count_is_minimum_of_both_sides() {
        let (mut layout, config) = two_cell_floor(DoorLayout::new(0, 2, 0, 0), DoorLayout::new(0, 0, 0, 1));
        compute_door_masks(&mut layout, &config);

        assert_eq!(layout.door_mask(GridPos::new(0, 0)).door_count(Direction::East), 1);
        assert_eq!(layout.door_mask(GridPos::new(1, 0)).door_count(Direction::West), 1);
        assert!(layout.asymmetric_walls().is_empty());
    }

    #[test]
    fn test_double_doors_need_both_sides() {
        let (mut layout, config) = two_cell_floor(DoorLayout::ALL_DOUBLE, DoorLayout::ALL_DOUBLE);
        compute_door_masks(&mut layout, &config);

        let mask = layout.door_mask(GridPos::new(0, 0));
        assert_eq!(mask.door_count(Direction::East), 2);
        // no neighbor: capability alone opens nothing
        assert_eq!(mask.door_count(Direction::North), 0);
        assert_eq!(mask.door_count(Direction::West), 0);
        assert_eq!(mask.total(), 2);
    }

    #[test]
    fn test_missing_side_closes_wall() {
        let (mut layout, config) = two_cell_floor(DoorLayout::new(0, 1, 0, 0), DoorLayout::new(1, 0, 0, 0));
        compute_door_masks(&mut layout, &config);

        assert_eq!(layout.door_mask(GridPos::new(0, 0)).total(), 0);
        assert_eq!(layout.door_mask(GridPos::new(1, 0)).total(), 0);
        assert!(!layout.is_connected());
    }
}
