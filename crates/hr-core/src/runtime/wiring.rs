//! Door wiring: pairing doorways of neighboring rooms
//!
//! Each room's doors are grouped by the grid offset they lead to. For every
//! adjacency the two facing groups are sorted along the shared wall and
//! paired index by index. Whatever is left over is an orphan: locked and
//! hidden for the rest of the floor.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use log::debug;

use super::{DoorId, FloorArena};
use crate::floor::GridPos;

/// Outcome of a wiring pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringReport {
    pub linked_pairs: usize,
    /// Doors left without a partner, in door order
    pub orphan_doors: Vec<DoorId>,
}

/// Link every facing door pair of the arena
pub fn wire_doors(arena: &mut FloorArena) -> WiringReport {
    // door groups per room, keyed by target offset
    let groups: Vec<BTreeMap<GridPos, Vec<DoorId>>> = arena
        .rooms()
        .iter()
        .map(|room| {
            let mut by_offset: BTreeMap<GridPos, Vec<DoorId>> = BTreeMap::new();
            for &door_id in &room.doors {
                if let Some(door) = arena.door(door_id) {
                    by_offset.entry(door.target_offset).or_default().push(door_id);
                }
            }
            by_offset
        })
        .collect();

    let mut visited: HashSet<(GridPos, GridPos)> = HashSet::new();
    let mut pairs: Vec<(DoorId, DoorId)> = Vec::new();

    for (room, by_offset) in arena.rooms().iter().zip(&groups) {
        for (&offset, here) in by_offset {
            if offset.is_zero() {
                continue;
            }
            let neighbor_pos = room.pos + offset;
            let Some(neighbor) = arena.room_at(neighbor_pos) else {
                continue;
            };

            let key = if room.pos <= neighbor_pos {
                (room.pos, neighbor_pos)
            } else {
                (neighbor_pos, room.pos)
            };
            if !visited.insert(key) {
                continue;
            }

            let Some(there) = groups[neighbor.index as usize].get(&-offset) else {
                continue;
            };

            let here = sorted_along_wall(arena, here);
            let there = sorted_along_wall(arena, there);
            pairs.extend(here.into_iter().zip(there));
        }
    }

    for &(a, b) in &pairs {
        arena.link(a, b);
    }

    let all_doors: Vec<DoorId> = arena.doors().iter().map(|d| d.id).collect();
    let mut orphan_doors = Vec::new();
    for door_id in all_doors {
        let linked = arena.is_linked(door_id);
        if let Some(door) = arena.door_mut(door_id) {
            door.locked = !linked;
            door.visible = linked;
        }
        if !linked {
            orphan_doors.push(door_id);
        }
    }

    let report = WiringReport {
        linked_pairs: arena.link_count(),
        orphan_doors,
    };
    debug!(
        "wired {} door pairs, {} orphan doors",
        report.linked_pairs,
        report.orphan_doors.len()
    );
    report
}

fn sorted_along_wall(arena: &FloorArena, doors: &[DoorId]) -> Vec<DoorId> {
    let mut keyed: Vec<(f32, DoorId)> = doors
        .iter()
        .filter_map(|&id| arena.door(id).map(|d| (d.wall_coordinate(), id)))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::{
        Direction, DoorLayout, DoorPlacement, FloorConfig, PoolKind, RoomCategory, RoomPrefab, RoomTemplate,
        TemplateId, WorldPos, layout_from_placements,
    };

    fn arena_for(config: &FloorConfig, placements: &[(GridPos, TemplateId)]) -> FloorArena {
        let layout = layout_from_placements(config, placements, 1);
        FloorArena::assemble(1, &layout, config)
    }

    fn normal(index: u32) -> TemplateId {
        TemplateId::new(PoolKind::Normal, index)
    }

    #[test]
    fn test_double_doors_pair_along_wall() {
        let mut config = FloorConfig::new("wiring");
        config.normal_rooms = vec![RoomTemplate::new("wide", RoomCategory::Normal, DoorLayout::new(0, 2, 0, 2))];
        let mut arena = arena_for(&config, &[(GridPos::ZERO, normal(0)), (GridPos::new(1, 0), normal(0))]);

        let report = wire_doors(&mut arena);
        assert_eq!(report.linked_pairs, 2);
        // the outer west doors of the first room and east doors of the second
        assert_eq!(report.orphan_doors.len(), 4);

        for door in arena.doors() {
            if let Some(partner) = arena.partner(door.id) {
                let partner = arena.door(partner).unwrap();
                assert_eq!(door.position.y, partner.position.y);
                assert_eq!(door.direction.opposite(), partner.direction);
                assert!(!door.locked && door.visible);
            } else {
                assert!(door.locked && !door.visible);
            }
        }
    }

    #[test]
    fn test_count_mismatch_leaves_orphan() {
        let mut config = FloorConfig::new("wiring");
        config.normal_rooms = vec![
            RoomTemplate::new("double", RoomCategory::Normal, DoorLayout::new(0, 2, 0, 0)),
            RoomTemplate::new("single", RoomCategory::Normal, DoorLayout::new(0, 0, 0, 1)),
        ];
        let mut arena = arena_for(&config, &[(GridPos::ZERO, normal(0)), (GridPos::new(1, 0), normal(1))]);

        let report = wire_doors(&mut arena);
        assert_eq!(report.linked_pairs, 1);
        assert_eq!(report.orphan_doors.len(), 1);
        assert!(arena.blocks(report.orphan_doors[0]));
    }

    #[test]
    fn test_target_offset_override_links_distant_room() {
        let mut config = FloorConfig::new("wiring");
        let far_east = RoomPrefab {
            doors: vec![DoorPlacement::new(Direction::East, WorldPos::new(10.0, 0.0))
                .with_target_offset(GridPos::new(2, 0))],
            ..RoomPrefab::default()
        };
        let far_west = RoomPrefab {
            doors: vec![DoorPlacement::new(Direction::West, WorldPos::new(-10.0, 0.0))
                .with_target_offset(GridPos::new(-2, 0))],
            ..RoomPrefab::default()
        };
        config.normal_rooms = vec![
            RoomTemplate::new("a", RoomCategory::Normal, DoorLayout::NONE).with_prefab(far_east),
            RoomTemplate::new("b", RoomCategory::Normal, DoorLayout::NONE).with_prefab(far_west),
        ];
        let mut arena = arena_for(&config, &[(GridPos::ZERO, normal(0)), (GridPos::new(2, 0), normal(1))]);

        let report = wire_doors(&mut arena);
        assert_eq!(report.linked_pairs, 1);
        assert!(report.orphan_doors.is_empty());
        assert_eq!(arena.partner(DoorId::new(1, 0)), Some(DoorId::new(1, 1)));
    }

    #[test]
    fn test_zero_offset_door_stays_locked() {
        let mut config = FloorConfig::new("wiring");
        let prefab = RoomPrefab {
            doors: vec![DoorPlacement::new(Direction::North, WorldPos::new(0.0, 6.0))
                .with_target_offset(GridPos::ZERO)],
            ..RoomPrefab::default()
        };
        config.normal_rooms = vec![RoomTemplate::new("loop", RoomCategory::Normal, DoorLayout::NONE).with_prefab(prefab)];
        let mut arena = arena_for(&config, &[(GridPos::ZERO, normal(0))]);

        let report = wire_doors(&mut arena);
        assert_eq!(report.linked_pairs, 0);
        assert_eq!(report.orphan_doors, vec![DoorId::new(1, 0)]);
        assert!(arena.door(DoorId::new(1, 0)).unwrap().is_self_referential());
    }
}
