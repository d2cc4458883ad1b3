//! Room templates, categories and prefab descriptions

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Direction, DoorLayout, GridPos, WorldPos};
use crate::consts::{
    DEFAULT_MAX_DEPTH, DEFAULT_MIN_DEPTH, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, DOOR_ENTRY_INSET,
};

/// What a room is for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomCategory {
    Start,
    #[default]
    Normal,
    Treasure,
    Shop,
    Boss,
}

impl RoomCategory {
    /// Rooms of this category hold an enemy encounter and lock until cleared
    pub const fn spawns_encounter(self) -> bool {
        match self {
            RoomCategory::Normal | RoomCategory::Boss => true,
            RoomCategory::Start | RoomCategory::Treasure | RoomCategory::Shop => false,
        }
    }

    /// Categories placed after the skeleton is built rather than by matching
    pub const fn is_forced(self) -> bool {
        match self {
            RoomCategory::Treasure | RoomCategory::Shop => true,
            RoomCategory::Start | RoomCategory::Normal | RoomCategory::Boss => false,
        }
    }

    /// Map symbol
    pub const fn symbol(self) -> char {
        match self {
            RoomCategory::Start => '@',
            RoomCategory::Normal => '#',
            RoomCategory::Treasure => '$',
            RoomCategory::Shop => '%',
            RoomCategory::Boss => 'B',
        }
    }
}

/// Which catalog list a template lives in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PoolKind {
    Start,
    Boss,
    Normal,
    Special,
    Treasure,
    Shop,
}

impl PoolKind {
    /// Category every template of this pool must have
    pub const fn category(self) -> RoomCategory {
        match self {
            PoolKind::Start => RoomCategory::Start,
            PoolKind::Boss => RoomCategory::Boss,
            PoolKind::Normal | PoolKind::Special => RoomCategory::Normal,
            PoolKind::Treasure => RoomCategory::Treasure,
            PoolKind::Shop => RoomCategory::Shop,
        }
    }

    /// Pool reserved for a forced category
    pub const fn for_forced(category: RoomCategory) -> Option<PoolKind> {
        match category {
            RoomCategory::Treasure => Some(PoolKind::Treasure),
            RoomCategory::Shop => Some(PoolKind::Shop),
            RoomCategory::Start | RoomCategory::Normal | RoomCategory::Boss => None,
        }
    }
}

/// Reference to a template inside a floor config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId {
    pub pool: PoolKind,
    pub index: u32,
}

impl TemplateId {
    pub const START: TemplateId = TemplateId::new(PoolKind::Start, 0);
    pub const BOSS: TemplateId = TemplateId::new(PoolKind::Boss, 0);

    pub const fn new(pool: PoolKind, index: u32) -> Self {
        Self { pool, index }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.pool, self.index)
    }
}

/// A physical doorway in a prefab, in room-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacement {
    pub direction: Direction,
    /// Grid offset this door leads to, for connections that are not one
    /// step through `direction`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_offset: Option<GridPos>,
    pub position: WorldPos,
    /// Where a player arriving through this door is placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<WorldPos>,
}

impl DoorPlacement {
    pub fn new(direction: Direction, position: WorldPos) -> Self {
        Self {
            direction,
            target_offset: None,
            position,
            entry_point: None,
        }
    }

    pub fn with_target_offset(mut self, offset: GridPos) -> Self {
        self.target_offset = Some(offset);
        self
    }

    pub fn target_offset(&self) -> GridPos {
        self.target_offset.unwrap_or(self.direction.offset())
    }

    pub fn entry_point(&self) -> WorldPos {
        self.entry_point.unwrap_or_else(|| {
            let inward = self.direction.opposite().offset();
            self.position + WorldPos::new(inward.x as f32, inward.y as f32) * DOOR_ENTRY_INSET
        })
    }
}

/// Physical description of a room: size, doorways and spawn points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPrefab {
    pub size: WorldPos,
    /// Explicit doorways. When empty, doorways follow the template's layout.
    pub doors: Vec<DoorPlacement>,
    pub spawn_points: Vec<WorldPos>,
    pub player_spawn: Option<WorldPos>,
}

impl Default for RoomPrefab {
    fn default() -> Self {
        Self {
            size: WorldPos::new(DEFAULT_ROOM_WIDTH, DEFAULT_ROOM_HEIGHT),
            doors: Vec::new(),
            spawn_points: Vec::new(),
            player_spawn: None,
        }
    }
}

impl RoomPrefab {
    /// Doorways this prefab carries for a template with `layout`
    pub fn door_placements(&self, layout: &DoorLayout) -> Vec<DoorPlacement> {
        if !self.doors.is_empty() {
            return self.doors.clone();
        }

        let half_w = self.size.x / 2.0;
        let half_h = self.size.y / 2.0;
        let mut placements = Vec::new();
        for direction in Direction::ALL {
            let spread: &[f32] = match layout.door_count(direction) {
                0 => &[],
                1 => &SINGLE_DOOR_SPREAD,
                _ => &DOUBLE_DOOR_SPREAD,
            };
            for &t in spread {
                let position = match direction {
                    Direction::North => WorldPos::new(t * self.size.x, half_h),
                    Direction::South => WorldPos::new(t * self.size.x, -half_h),
                    Direction::East => WorldPos::new(half_w, t * self.size.y),
                    Direction::West => WorldPos::new(-half_w, t * self.size.y),
                };
                placements.push(DoorPlacement::new(direction, position));
            }
        }
        placements
    }

    pub fn player_spawn(&self) -> WorldPos {
        self.player_spawn.unwrap_or(WorldPos::ZERO)
    }
}

/// Along-wall door offsets as a fraction of the wall: centered, or at one
/// and two thirds
const SINGLE_DOOR_SPREAD: [f32; 1] = [0.0];
const DOUBLE_DOOR_SPREAD: [f32; 2] = [-1.0 / 6.0, 1.0 / 6.0];

fn default_weight() -> u32 {
    1
}

fn default_difficulty() -> u32 {
    1
}

fn default_min_depth() -> u32 {
    DEFAULT_MIN_DEPTH
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

/// Catalog entry pairing a room prefab with its selection rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub name: String,
    #[serde(default)]
    pub category: RoomCategory,
    #[serde(default)]
    pub doors: DoorLayout,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_rating: u32,
    /// Inclusive depth window
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default)]
    pub prefab: RoomPrefab,
}

impl RoomTemplate {
    pub fn new(name: impl Into<String>, category: RoomCategory, doors: DoorLayout) -> Self {
        Self {
            name: name.into(),
            category,
            doors,
            weight: default_weight(),
            difficulty_rating: default_difficulty(),
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            prefab: RoomPrefab::default(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_difficulty(mut self, rating: u32) -> Self {
        self.difficulty_rating = rating;
        self
    }

    pub fn with_depth_range(mut self, min_depth: u32, max_depth: u32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn with_prefab(mut self, prefab: RoomPrefab) -> Self {
        self.prefab = prefab;
        self
    }

    /// Selection weight, never below 1
    pub fn effective_weight(&self) -> u32 {
        self.weight.max(1)
    }

    pub fn supports_doors(&self, required: &DoorLayout) -> bool {
        self.doors.satisfies(required)
    }

    pub fn supports_depth(&self, depth: u32) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }

    /// Doorways instantiated for this template
    pub fn door_placements(&self) -> Vec<DoorPlacement> {
        self.prefab.door_placements(&self.doors)
    }
}
