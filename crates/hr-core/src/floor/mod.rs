//! Floor generation
//!
//! Catalog types, the seeded layout generator and door masking.

mod authored;
mod config;
mod direction;
mod door_layout;
mod generation;
mod layout;
mod masking;
mod template;

pub use authored::{AuthoredFloor, AuthoredRoom};
pub use config::{EnemyPoolEntry, EnemySettings, FloorConfig, LayoutSettings};
pub use direction::{Direction, GridPos, WorldPos};
pub use door_layout::{DoorLayout, DoorMask};
pub use generation::{
    add_branches, assign_templates, build_main_path, generate, layout_from_placements,
    place_forced_rooms, required_doors,
};
pub use layout::{GeneratedFloorLayout, LayoutCell, LayoutWarning};
pub use masking::{compute_door_masks, door_mask_for, pair_count};
pub use template::{DoorPlacement, PoolKind, RoomCategory, RoomPrefab, RoomTemplate, TemplateId};
