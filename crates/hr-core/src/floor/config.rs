//! Floor configuration: template catalog, layout tunables and enemy curve
//!
//! A config is static content. Selection queries borrow it immutably and
//! hand back [`TemplateId`]s; nothing here is mutated after loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DoorLayout, PoolKind, RoomCategory, RoomTemplate, TemplateId, WorldPos};
use crate::consts::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, MIN_MAIN_PATH_LENGTH, TEMPLATE_DIFFICULTY_FACTOR,
};
use crate::errors::ConfigError;
use crate::rng::FloorRng;

/// Shape of the generated room graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Inclusive range of main path cells (start and boss included)
    pub main_path_length: (u32, u32),
    pub max_branches: u32,
    pub branch_length: u32,
    /// World size of one grid cell
    pub cell_spacing: WorldPos,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            main_path_length: (4, 7),
            max_branches: 2,
            branch_length: 1,
            cell_spacing: WorldPos::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT),
        }
    }
}

impl LayoutSettings {
    /// Main path bounds after clamping: at least three cells, max >= min
    pub fn path_length_bounds(&self) -> (u32, u32) {
        let min = self.main_path_length.0.max(MIN_MAIN_PATH_LENGTH);
        let max = self.main_path_length.1.max(min);
        (min, max)
    }

    pub fn effective_branch_length(&self) -> u32 {
        self.branch_length.max(1)
    }
}

/// Weighted entry of the enemy pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPoolEntry {
    /// Prefab name handed to the spawner collaborator
    pub prefab: String,
    #[serde(default = "default_enemy_weight")]
    pub weight: u32,
    #[serde(default)]
    pub min_difficulty: f32,
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: f32,
}

fn default_enemy_weight() -> u32 {
    1
}

fn default_max_difficulty() -> f32 {
    f32::MAX
}

impl EnemyPoolEntry {
    pub fn new(prefab: impl Into<String>, weight: u32, min_difficulty: f32, max_difficulty: f32) -> Self {
        Self {
            prefab: prefab.into(),
            weight,
            min_difficulty,
            max_difficulty,
        }
    }

    pub fn supports_difficulty(&self, difficulty: f32) -> bool {
        difficulty >= self.min_difficulty && difficulty <= self.max_difficulty
    }
}

/// Enemy count and difficulty curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub base_enemy_count: (u32, u32),
    pub additional_enemies_per_depth: u32,
    pub boss_enemy_count: u32,
    pub base_difficulty: f32,
    pub difficulty_per_depth: f32,
    pub pool: Vec<EnemyPoolEntry>,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            base_enemy_count: (2, 4),
            additional_enemies_per_depth: 0,
            boss_enemy_count: 1,
            base_difficulty: 1.0,
            difficulty_per_depth: 0.5,
            pool: Vec::new(),
        }
    }
}

/// Catalog and tunables for one floor theme
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub name: String,
    pub start_room: Option<RoomTemplate>,
    pub boss_room: Option<RoomTemplate>,
    pub normal_rooms: Vec<RoomTemplate>,
    /// Fallback pool for cells no normal template fits
    pub special_rooms: Vec<RoomTemplate>,
    pub treasure_rooms: Vec<RoomTemplate>,
    pub shop_rooms: Vec<RoomTemplate>,
    pub layout: LayoutSettings,
    pub enemies: EnemySettings,
}

impl FloorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FloorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the catalog for content errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.layout.main_path_length;
        if min > max {
            return Err(ConfigError::PathLength { min, max });
        }

        for pool in [
            PoolKind::Start,
            PoolKind::Boss,
            PoolKind::Normal,
            PoolKind::Special,
            PoolKind::Treasure,
            PoolKind::Shop,
        ] {
            for template in self.pool(pool) {
                if template.min_depth > template.max_depth {
                    return Err(ConfigError::DepthRange {
                        template: template.name.clone(),
                        min: template.min_depth,
                        max: template.max_depth,
                    });
                }
                if template.category != pool.category() {
                    return Err(ConfigError::CategoryMismatch {
                        template: template.name.clone(),
                        category: template.category,
                        pool,
                    });
                }
            }
        }

        let (min, max) = self.enemies.base_enemy_count;
        if min > max {
            return Err(ConfigError::EnemyCount { min, max });
        }

        for entry in &self.enemies.pool {
            if entry.min_difficulty > entry.max_difficulty {
                return Err(ConfigError::EnemyDifficulty {
                    prefab: entry.prefab.clone(),
                    min: entry.min_difficulty,
                    max: entry.max_difficulty,
                });
            }
        }

        Ok(())
    }

    /// Templates of one pool; singletons yield zero or one entry
    pub fn pool(&self, pool: PoolKind) -> &[RoomTemplate] {
        match pool {
            PoolKind::Start => self.start_room.as_slice(),
            PoolKind::Boss => self.boss_room.as_slice(),
            PoolKind::Normal => &self.normal_rooms,
            PoolKind::Special => &self.special_rooms,
            PoolKind::Treasure => &self.treasure_rooms,
            PoolKind::Shop => &self.shop_rooms,
        }
    }

    pub fn template(&self, id: TemplateId) -> Option<&RoomTemplate> {
        self.pool(id.pool).get(id.index as usize)
    }

    pub fn has_start_room(&self) -> bool {
        self.start_room.is_some()
    }

    pub fn has_boss_room(&self) -> bool {
        self.boss_room.is_some()
    }

    /// Whether a forced category has any templates to draw from
    pub fn has_forced_pool(&self, category: RoomCategory) -> bool {
        PoolKind::for_forced(category).is_some_and(|pool| !self.pool(pool).is_empty())
    }

    /// No templates at all; generation cannot produce anything
    pub fn is_empty(&self) -> bool {
        self.start_room.is_none()
            && self.boss_room.is_none()
            && self.normal_rooms.is_empty()
            && self.special_rooms.is_empty()
            && self.treasure_rooms.is_empty()
            && self.shop_rooms.is_empty()
    }

    pub fn random_normal_template(
        &self,
        required: &DoorLayout,
        depth: u32,
        rng: &mut FloorRng,
    ) -> Option<TemplateId> {
        self.random_template(PoolKind::Normal, required, depth, rng)
    }

    pub fn random_special_template(
        &self,
        required: &DoorLayout,
        depth: u32,
        rng: &mut FloorRng,
    ) -> Option<TemplateId> {
        self.random_template(PoolKind::Special, required, depth, rng)
    }

    /// Weighted pick among a pool's templates that offer `required` doors
    /// and allow `depth`
    ///
    /// Returns `None` without drawing when nothing qualifies.
    pub fn random_template(
        &self,
        pool: PoolKind,
        required: &DoorLayout,
        depth: u32,
        rng: &mut FloorRng,
    ) -> Option<TemplateId> {
        let candidates: Vec<(u32, u32)> = self
            .pool(pool)
            .iter()
            .enumerate()
            .filter(|(_, t)| t.supports_doors(required) && t.supports_depth(depth))
            .filter_map(|(i, t)| Some((u32::try_from(i).ok()?, t.effective_weight())))
            .collect();

        weighted_pick(&candidates, rng).map(|index| TemplateId::new(pool, index))
    }

    /// Number of enemies for a room's encounter
    pub fn enemy_count(&self, template: &RoomTemplate, depth: u32, rng: &mut FloorRng) -> u32 {
        if template.category == RoomCategory::Boss {
            return self.enemies.boss_enemy_count.max(1);
        }

        let extra = depth.saturating_mul(self.enemies.additional_enemies_per_depth);
        let min = self.enemies.base_enemy_count.0.saturating_add(extra);
        let max = self.enemies.base_enemy_count.1.saturating_add(extra).max(min);
        rng.range_inclusive(min.max(1), max.max(1))
    }

    /// Encounter difficulty at `depth`, raised by the template's rating
    pub fn difficulty_for_depth(&self, depth: u32, template: Option<&RoomTemplate>) -> f32 {
        let mut difficulty =
            self.enemies.base_difficulty + depth as f32 * self.enemies.difficulty_per_depth;
        if let Some(template) = template {
            difficulty += template.difficulty_rating as f32 * TEMPLATE_DIFFICULTY_FACTOR;
        }
        difficulty
    }

    /// Weighted pick of an enemy prefab that fits `difficulty`
    pub fn enemy_for_difficulty(&self, difficulty: f32, rng: &mut FloorRng) -> Option<&str> {
        let candidates: Vec<(usize, u32)> = self
            .enemies
            .pool
            .iter()
            .enumerate()
            .filter(|(_, e)| e.weight > 0 && !e.prefab.is_empty() && e.supports_difficulty(difficulty))
            .map(|(i, e)| (i, e.weight))
            .collect();

        weighted_pick(&candidates, rng).map(|i| self.enemies.pool[i].prefab.as_str())
    }
}

/// Draw one key from `(key, weight)` pairs, each weight counted as at least 1
fn weighted_pick<K: Copy>(candidates: &[(K, u32)], rng: &mut FloorRng) -> Option<K> {
    let first = candidates.first()?;
    let total: u64 = candidates.iter().map(|&(_, w)| u64::from(w.max(1))).sum();

    let mut roll = match u32::try_from(total) {
        Ok(total) => u64::from(rng.rn2(total)),
        Err(_) => rng.rn2_u64(total),
    };
    for &(key, weight) in candidates {
        let weight = u64::from(weight.max(1));
        if roll < weight {
            return Some(key);
        }
        roll -= weight;
    }

    Some(first.0)
}
