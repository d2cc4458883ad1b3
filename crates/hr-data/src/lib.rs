//! hr-data: Built-in floor catalogs for Heretic
//!
//! One theme per floor, in descent order, plus the hand-authored sanctum
//! used when a theme has nothing to generate from.

pub mod catacombs;
pub mod crypt;
pub mod sanctum;

use hr_core::floor::{FloorConfig, RoomPrefab, WorldPos};

pub use catacombs::catacombs;
pub use crypt::crypt;
pub use sanctum::sanctum;

/// Names of the built-in themes, in floor order
pub const THEME_NAMES: [&str; 2] = ["crypt", "catacombs"];

/// Every built-in theme, in floor order
pub fn builtin_floors() -> Vec<FloorConfig> {
    vec![crypt(), catacombs()]
}

/// Look up a built-in theme by name (case-insensitive)
pub fn floor_by_name(name: &str) -> Option<FloorConfig> {
    builtin_floors()
        .into_iter()
        .find(|config| config.name.eq_ignore_ascii_case(name))
}

/// Prefab of default size with enemy spawn points at the given offsets
pub(crate) fn spawn_prefab(points: &[(f32, f32)]) -> RoomPrefab {
    RoomPrefab {
        spawn_points: points.iter().map(|&(x, y)| WorldPos::new(x, y)).collect(),
        ..RoomPrefab::default()
    }
}
