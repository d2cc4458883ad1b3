//! Generated floor layout: the grid of chosen templates, depths and doors

use core::fmt;
use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use super::{Direction, DoorMask, GridPos, RoomCategory, TemplateId};

/// Something generation had to work around
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutWarning {
    /// No candidate cell was left for a forced category
    ForcedRoomOmitted { category: RoomCategory },
    /// A forced cell's pool had no fitting template; a normal room was used
    ForcedRoomFallback { pos: GridPos, category: RoomCategory },
    /// No pool fitted the cell; the start template was used
    StartTemplateFallback { pos: GridPos },
    /// Nothing at all could be placed at the cell
    Unassigned { pos: GridPos },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::ForcedRoomOmitted { category } => {
                write!(f, "no free cell left for the {} room; omitted", category)
            }
            LayoutWarning::ForcedRoomFallback { pos, category } => write!(
                f,
                "no {} template fits {}; placed a normal room instead",
                category, pos
            ),
            LayoutWarning::StartTemplateFallback { pos } => {
                write!(f, "no template matched at {}; using start room as fallback", pos)
            }
            LayoutWarning::Unassigned { pos } => {
                write!(f, "no template at all for {}; cell left empty", pos)
            }
        }
    }
}

/// One placed cell, flattened for dumps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub pos: GridPos,
    pub template: TemplateId,
    pub depth: u32,
    pub doors: DoorMask,
}

/// Result of floor generation
///
/// Parallel maps keyed by grid coordinate, plus the placement order so that
/// anything iterating the floor does so deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedFloorLayout {
    pub seed: u64,
    pub start: GridPos,
    pub boss: GridPos,
    /// Occupied cells in the order they were placed
    pub order: Vec<GridPos>,
    pub rooms: HashMap<GridPos, TemplateId>,
    pub depths: HashMap<GridPos, u32>,
    pub door_masks: HashMap<GridPos, DoorMask>,
    /// Cells assigned to forced categories
    pub forced: HashMap<GridPos, RoomCategory>,
    pub warnings: Vec<LayoutWarning>,
}

impl GeneratedFloorLayout {
    pub fn template(&self, pos: GridPos) -> Option<TemplateId> {
        self.rooms.get(&pos).copied()
    }

    /// Depth of a cell; 0 when unknown
    pub fn depth(&self, pos: GridPos) -> u32 {
        self.depths.get(&pos).copied().unwrap_or(0)
    }

    pub fn door_mask(&self, pos: GridPos) -> DoorMask {
        self.door_masks.get(&pos).copied().unwrap_or_default()
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.depths.contains_key(&pos)
    }

    pub fn has_room(&self, pos: GridPos) -> bool {
        self.rooms.contains_key(&pos)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Cells that received a template, in placement order
    pub fn placed_rooms(&self) -> impl Iterator<Item = (GridPos, TemplateId)> + '_ {
        self.order
            .iter()
            .filter_map(|pos| self.rooms.get(pos).map(|&id| (*pos, id)))
    }

    /// Placed cells in placement order
    pub fn cells(&self) -> Vec<LayoutCell> {
        self.placed_rooms()
            .map(|(pos, template)| LayoutCell {
                pos,
                template,
                depth: self.depth(pos),
                doors: self.door_mask(pos),
            })
            .collect()
    }

    /// Cells reachable from the start through walls with realized doors
    pub fn reachable_from_start(&self) -> HashSet<GridPos> {
        let mut seen = HashSet::new();
        if !self.has_room(self.start) {
            return seen;
        }

        let mut queue = VecDeque::from([self.start]);
        seen.insert(self.start);
        while let Some(pos) = queue.pop_front() {
            let mask = self.door_mask(pos);
            for (direction, next) in pos.neighbors() {
                if mask.door_count(direction) == 0 || !self.has_room(next) {
                    continue;
                }
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_connected(&self) -> bool {
        self.reachable_from_start().len() == self.room_count()
    }

    /// Walls whose two sides disagree on their door count
    pub fn asymmetric_walls(&self) -> Vec<(GridPos, Direction)> {
        let mut walls = Vec::new();
        for &pos in &self.order {
            let mask = self.door_mask(pos);
            for (direction, next) in pos.neighbors() {
                if !self.has_room(next) {
                    continue;
                }
                let theirs = self.door_mask(next).door_count(direction.opposite());
                if mask.door_count(direction) != theirs {
                    walls.push((pos, direction));
                }
            }
        }
        walls
    }

    /// Cells holding the given template
    pub fn cells_with(&self, id: TemplateId) -> Vec<GridPos> {
        self.placed_rooms()
            .filter(|&(_, t)| t == id)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Bounding box of occupied cells as (min, max)
    pub fn bounds(&self) -> Option<(GridPos, GridPos)> {
        let first = *self.order.first()?;
        let mut min = first;
        let mut max = first;
        for pos in &self.order {
            min = GridPos::new(min.x.min(pos.x), min.y.min(pos.y));
            max = GridPos::new(max.x.max(pos.x), max.y.max(pos.y));
        }
        Some((min, max))
    }
}
