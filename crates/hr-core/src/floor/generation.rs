//! Floor layout generation
//!
//! Builds the room graph for one floor in four stages, all drawing from a
//! single seeded stream in this order:
//! 1. Main path: a self-avoiding walk from the origin to the boss cell
//! 2. Branches: short side paths grafted onto interior path cells
//! 3. Forced rooms: treasure and shop cells picked from a shuffled list
//! 4. Templates: a weighted pick per cell, in placement order
//!
//! Door masks are then derived from the chosen templates. Nothing here can
//! fail; every shortfall degrades to a fallback and a recorded warning.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use log::{debug, warn};
use strum::IntoEnumIterator;

use super::masking::compute_door_masks;
use super::{
    Direction, DoorLayout, FloorConfig, GeneratedFloorLayout, GridPos, LayoutSettings, LayoutWarning,
    PoolKind, RoomCategory, TemplateId,
};
use crate::consts::MAX_WALK_ATTEMPTS;
use crate::rng::FloorRng;

/// Generate a floor layout. The same seed and config give the same layout.
pub fn generate(config: &FloorConfig, seed: u64) -> GeneratedFloorLayout {
    let mut rng = FloorRng::new(seed);

    let path = build_main_path(&config.layout, &mut rng);
    let mut layout = GeneratedFloorLayout {
        seed,
        start: GridPos::ZERO,
        boss: path.last().copied().unwrap_or(GridPos::ZERO),
        ..GeneratedFloorLayout::default()
    };
    for (depth, &pos) in path.iter().enumerate() {
        insert_cell(&mut layout, pos, depth as u32);
    }

    add_branches(&config.layout, &mut rng, &mut layout, &path);
    place_forced_rooms(config, &mut layout, &mut rng);
    assign_templates(config, &mut layout, &mut rng);
    compute_door_masks(&mut layout, config);

    debug!(
        "generated floor '{}' seed {}: {} cells, path {}, boss at {}",
        config.name,
        seed,
        layout.order.len(),
        path.len(),
        layout.boss
    );
    layout
}

/// Layout for a hand-authored room list
///
/// The first placement is the start, the last one the boss cell. Depth is
/// the walking distance from the start through occupied cells.
pub fn layout_from_placements(
    config: &FloorConfig,
    placements: &[(GridPos, TemplateId)],
    seed: u64,
) -> GeneratedFloorLayout {
    let mut layout = GeneratedFloorLayout {
        seed,
        start: placements.first().map_or(GridPos::ZERO, |p| p.0),
        boss: placements.last().map_or(GridPos::ZERO, |p| p.0),
        ..GeneratedFloorLayout::default()
    };

    for &(pos, id) in placements {
        if layout.is_occupied(pos) {
            continue;
        }
        insert_cell(&mut layout, pos, 0);
        if config.template(id).is_some() {
            layout.rooms.insert(pos, id);
        } else {
            record(&mut layout, LayoutWarning::Unassigned { pos });
        }
    }

    let distances = walking_distances(&layout);
    for (index, pos) in layout.order.clone().into_iter().enumerate() {
        let depth = distances.get(&pos).copied().unwrap_or(index as u32);
        layout.depths.insert(pos, depth);
    }

    compute_door_masks(&mut layout, config);
    layout
}

fn insert_cell(layout: &mut GeneratedFloorLayout, pos: GridPos, depth: u32) {
    if layout.depths.insert(pos, depth).is_none() {
        layout.order.push(pos);
    }
}

fn record(layout: &mut GeneratedFloorLayout, warning: LayoutWarning) {
    warn!("{}", warning);
    layout.warnings.push(warning);
}

/// Self-avoiding random walk from the origin
///
/// Each step tries up to [`MAX_WALK_ATTEMPTS`] random directions; when all
/// of them hit visited cells the walk stops short.
pub fn build_main_path(settings: &LayoutSettings, rng: &mut FloorRng) -> Vec<GridPos> {
    let (min, max) = settings.path_length_bounds();
    let target = rng.range_inclusive(min, max) as usize;

    let mut path = vec![GridPos::ZERO];
    let mut visited: HashSet<GridPos> = HashSet::new();
    visited.insert(GridPos::ZERO);
    let mut current = GridPos::ZERO;

    while path.len() < target {
        let mut next = None;
        for _ in 0..MAX_WALK_ATTEMPTS {
            let direction = Direction::ALL[rng.index(Direction::ALL.len())];
            let candidate = current.step(direction);
            if !visited.contains(&candidate) {
                next = Some(candidate);
                break;
            }
        }

        let Some(next) = next else {
            debug!("main path boxed in at {} after {} cells", current, path.len());
            break;
        };
        path.push(next);
        visited.insert(next);
        current = next;
    }

    path
}

/// Graft up to `max_branches` side paths onto interior main path cells
pub fn add_branches(
    settings: &LayoutSettings,
    rng: &mut FloorRng,
    layout: &mut GeneratedFloorLayout,
    main_path: &[GridPos],
) {
    for _ in 0..settings.max_branches {
        if main_path.len() <= 2 {
            break;
        }

        // Endpoints never anchor a branch
        let anchor = main_path[1 + rng.index(main_path.len() - 2)];
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| !layout.is_occupied(anchor.step(d)))
            .collect();
        let Some(&direction) = rng.choose(&open) else {
            continue;
        };

        let anchor_depth = layout.depth(anchor);
        let mut current = anchor.step(direction);
        for segment in 0..settings.effective_branch_length() {
            if layout.is_occupied(current) {
                break;
            }
            insert_cell(layout, current, anchor_depth + segment + 1);
            current = current.step(direction);
        }
    }
}

/// Reserve cells for treasure and shop rooms
///
/// Candidates are every occupied cell except start and boss, shuffled. Each
/// forced category with a non-empty pool takes the next candidate; when
/// none are left the category is omitted.
pub fn place_forced_rooms(config: &FloorConfig, layout: &mut GeneratedFloorLayout, rng: &mut FloorRng) {
    let mut candidates: Vec<GridPos> = layout
        .order
        .iter()
        .copied()
        .filter(|&pos| pos != layout.start && pos != layout.boss)
        .collect();
    rng.shuffle(&mut candidates);

    let mut candidates = candidates.into_iter();
    for category in RoomCategory::iter().filter(|c| c.is_forced()) {
        if !config.has_forced_pool(category) {
            continue;
        }
        match candidates.next() {
            Some(pos) => {
                layout.forced.insert(pos, category);
            }
            None => record(layout, LayoutWarning::ForcedRoomOmitted { category }),
        }
    }
}

/// Doors a cell must offer: one per occupied neighbor
pub fn required_doors(layout: &GeneratedFloorLayout, pos: GridPos) -> DoorLayout {
    pos.neighbors()
        .into_iter()
        .fold(DoorLayout::NONE, |doors, (direction, next)| {
            if layout.is_occupied(next) {
                doors.with_count(direction, 1)
            } else {
                doors
            }
        })
}

/// Pick a template for every occupied cell, in placement order
pub fn assign_templates(config: &FloorConfig, layout: &mut GeneratedFloorLayout, rng: &mut FloorRng) {
    for pos in layout.order.clone() {
        let depth = layout.depth(pos);
        let required = required_doors(layout, pos);

        match select_template(config, layout, pos, depth, &required, rng) {
            Some(id) => {
                layout.rooms.insert(pos, id);
            }
            None if config.has_start_room() => {
                record(layout, LayoutWarning::StartTemplateFallback { pos });
                layout.rooms.insert(pos, TemplateId::START);
            }
            None => record(layout, LayoutWarning::Unassigned { pos }),
        }
    }
}

fn select_template(
    config: &FloorConfig,
    layout: &mut GeneratedFloorLayout,
    pos: GridPos,
    depth: u32,
    required: &DoorLayout,
    rng: &mut FloorRng,
) -> Option<TemplateId> {
    if pos == layout.start && config.has_start_room() {
        return Some(TemplateId::START);
    }
    if pos == layout.boss && pos != layout.start && config.has_boss_room() {
        return Some(TemplateId::BOSS);
    }

    if let Some(&category) = layout.forced.get(&pos) {
        let picked = PoolKind::for_forced(category)
            .and_then(|pool| config.random_template(pool, required, depth, rng));
        if picked.is_some() {
            return picked;
        }
        layout.forced.remove(&pos);
        record(layout, LayoutWarning::ForcedRoomFallback { pos, category });
    }

    config
        .random_normal_template(required, depth, rng)
        .or_else(|| config.random_special_template(required, depth, rng))
}

/// Breadth-first step counts from the start through occupied cells
fn walking_distances(layout: &GeneratedFloorLayout) -> HashMap<GridPos, u32> {
    let mut distances = HashMap::new();
    if !layout.is_occupied(layout.start) {
        return distances;
    }

    distances.insert(layout.start, 0);
    let mut queue = VecDeque::from([layout.start]);
    while let Some(pos) = queue.pop_front() {
        let depth = distances[&pos];
        for (_, next) in pos.neighbors() {
            if layout.is_occupied(next) && !distances.contains_key(&next) {
                distances.insert(next, depth + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::RoomTemplate;

    fn basic_config() -> FloorConfig {
        let mut config = FloorConfig::new("basic");
        config.start_room = Some(RoomTemplate::new("start", RoomCategory::Start, DoorLayout::ALL_SINGLE));
        config.boss_room = Some(RoomTemplate::new("boss", RoomCategory::Boss, DoorLayout::ALL_SINGLE));
        config.normal_rooms = vec![RoomTemplate::new("room", RoomCategory::Normal, DoorLayout::ALL_SINGLE)];
        config
    }

    #[test]
    fn test_main_path_is_self_avoiding() {
        let mut settings = LayoutSettings::default();
        settings.main_path_length = (12, 12);
        for seed in 1..50 {
            let mut rng = FloorRng::new(seed);
            let path = build_main_path(&settings, &mut rng);
            assert_eq!(path[0], GridPos::ZERO);
            assert!(path.len() <= 12);

            let unique: HashSet<_> = path.iter().collect();
            assert_eq!(unique.len(), path.len());
            for pair in path.windows(2) {
                let step = pair[1] - pair[0];
                assert!(Direction::from_offset(step).is_some());
            }
        }
    }

    #[test]
    fn test_path_length_respects_minimum_of_three() {
        let mut settings = LayoutSettings::default();
        settings.main_path_length = (0, 1);
        let mut rng = FloorRng::new(11);
        assert_eq!(build_main_path(&settings, &mut rng).len(), 3);
    }

    #[test]
    fn test_branch_depths_extend_from_anchor() {
        let mut config = basic_config();
        config.layout.main_path_length = (5, 5);
        config.layout.max_branches = 3;
        config.layout.branch_length = 2;

        for seed in 1..30 {
            let layout = generate(&config, seed);
            for &pos in &layout.order {
                if pos == layout.start {
                    continue;
                }
                // every non-start cell touches a cell one step shallower
                let depth = layout.depth(pos);
                let has_parent = pos
                    .neighbors()
                    .iter()
                    .any(|&(_, n)| layout.is_occupied(n) && layout.depth(n) + 1 == depth);
                assert!(has_parent, "seed {}: {} at depth {} has no parent", seed, pos, depth);
            }
        }
    }

    #[test]
    fn test_forced_rooms_skip_start_and_boss() {
        let mut config = basic_config();
        config.layout.main_path_length = (6, 6);
        config.treasure_rooms = vec![RoomTemplate::new("gold", RoomCategory::Treasure, DoorLayout::ALL_SINGLE)];
        config.shop_rooms = vec![RoomTemplate::new("shop", RoomCategory::Shop, DoorLayout::ALL_SINGLE)];

        for seed in 1..40 {
            let layout = generate(&config, seed);
            assert_eq!(layout.forced.len(), 2, "seed {}", seed);
            assert!(!layout.forced.contains_key(&layout.start));
            assert!(!layout.forced.contains_key(&layout.boss));
            assert_eq!(layout.cells_with(TemplateId::new(PoolKind::Treasure, 0)).len(), 1);
            assert_eq!(layout.cells_with(TemplateId::new(PoolKind::Shop, 0)).len(), 1);
        }
    }

    #[test]
    fn test_forced_room_omitted_without_candidates() {
        let mut config = basic_config();
        config.treasure_rooms = vec![RoomTemplate::new("gold", RoomCategory::Treasure, DoorLayout::ALL_SINGLE)];

        let mut layout = GeneratedFloorLayout {
            start: GridPos::ZERO,
            boss: GridPos::new(1, 0),
            ..GeneratedFloorLayout::default()
        };
        insert_cell(&mut layout, GridPos::ZERO, 0);
        insert_cell(&mut layout, GridPos::new(1, 0), 1);

        let mut rng = FloorRng::new(3);
        place_forced_rooms(&config, &mut layout, &mut rng);
        assert!(layout.forced.is_empty());
        assert_eq!(
            layout.warnings,
            vec![LayoutWarning::ForcedRoomOmitted { category: RoomCategory::Treasure }]
        );
    }

    #[test]
    fn test_forced_room_falls_back_to_normal() {
        let mut config = basic_config();
        config.layout.main_path_length = (5, 5);
        config.layout.max_branches = 0;
        // a treasure room that can never be entered
        config.treasure_rooms = vec![RoomTemplate::new("sealed", RoomCategory::Treasure, DoorLayout::NONE)];

        let layout = generate(&config, 8);
        assert!(layout.forced.is_empty());
        assert!(layout
            .warnings
            .iter()
            .any(|w| matches!(w, LayoutWarning::ForcedRoomFallback { category: RoomCategory::Treasure, .. })));
        assert!(layout.cells_with(TemplateId::new(PoolKind::Treasure, 0)).is_empty());
    }

    #[test]
    fn test_start_template_is_last_resort() {
        let mut config = basic_config();
        config.layout.main_path_length = (4, 4);
        config.layout.max_branches = 0;
        config.normal_rooms = vec![RoomTemplate::new("dead-end", RoomCategory::Normal, DoorLayout::new(1, 0, 0, 0))
            .with_depth_range(10, 12)];

        let layout = generate(&config, 42);
        let fallbacks = layout
            .warnings
            .iter()
            .filter(|w| matches!(w, LayoutWarning::StartTemplateFallback { .. }))
            .count();
        assert_eq!(fallbacks, 2);
        assert_eq!(layout.cells_with(TemplateId::START).len(), 3);
    }

    #[test]
    fn test_required_doors_follow_neighbors() {
        let mut layout = GeneratedFloorLayout::default();
        insert_cell(&mut layout, GridPos::ZERO, 0);
        insert_cell(&mut layout, GridPos::new(0, 1), 1);
        insert_cell(&mut layout, GridPos::new(-1, 0), 1);

        let required = required_doors(&layout, GridPos::ZERO);
        assert_eq!(required, DoorLayout::new(1, 0, 0, 1));
    }

    #[test]
    fn test_layout_from_placements() {
        let config = basic_config();
        let placements = [
            (GridPos::ZERO, TemplateId::START),
            (GridPos::new(1, 0), TemplateId::new(PoolKind::Normal, 0)),
            (GridPos::new(1, 1), TemplateId::new(PoolKind::Normal, 0)),
            (GridPos::new(2, 1), TemplateId::BOSS),
            (GridPos::new(9, 9), TemplateId::new(PoolKind::Shop, 4)),
        ];

        let layout = layout_from_placements(&config, &placements, 0);
        assert_eq!(layout.start, GridPos::ZERO);
        assert_eq!(layout.boss, GridPos::new(9, 9));
        assert_eq!(layout.room_count(), 4);
        assert_eq!(layout.depth(GridPos::new(2, 1)), 3);
        assert_eq!(layout.warnings, vec![LayoutWarning::Unassigned { pos: GridPos::new(9, 9) }]);
        assert_eq!(layout.door_mask(GridPos::new(1, 0)).door_count(Direction::North), 1);
    }
}
