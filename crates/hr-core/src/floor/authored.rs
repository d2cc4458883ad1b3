//! Hand-authored room lists
//!
//! Used when a theme's catalog is empty: the rooms are placed exactly as
//! listed instead of being generated.

use serde::{Deserialize, Serialize};

use super::generation::layout_from_placements;
use super::{FloorConfig, GeneratedFloorLayout, GridPos, TemplateId};

/// One authored room: a template placed at a fixed grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoredRoom {
    pub pos: GridPos,
    pub template: TemplateId,
}

impl AuthoredRoom {
    pub const fn new(pos: GridPos, template: TemplateId) -> Self {
        Self { pos, template }
    }
}

/// A fixed floor: its own catalog plus the rooms in visiting order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredFloor {
    pub config: FloorConfig,
    pub rooms: Vec<AuthoredRoom>,
}

impl AuthoredFloor {
    pub fn new(config: FloorConfig, rooms: Vec<AuthoredRoom>) -> Self {
        Self { config, rooms }
    }

    /// Nothing would be placed
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() || self.config.is_empty()
    }

    pub fn layout(&self, seed: u64) -> GeneratedFloorLayout {
        let placements: Vec<(GridPos, TemplateId)> =
            self.rooms.iter().map(|r| (r.pos, r.template)).collect();
        layout_from_placements(&self.config, &placements, seed)
    }
}
