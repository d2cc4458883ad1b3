//! Floor generation constants

/// Shortest main path the generator will aim for, in cells
pub const MIN_MAIN_PATH_LENGTH: u32 = 3;

/// Random directions tried per main path step before the walk gives up
pub const MAX_WALK_ATTEMPTS: u32 = 12;

/// Door slots per wall (single or double doorway)
pub const MAX_DOORS_PER_SIDE: u8 = 2;

/// Default template depth window
pub const DEFAULT_MIN_DEPTH: u32 = 0;
pub const DEFAULT_MAX_DEPTH: u32 = 20;

/// Default world size of one grid cell (room pitch)
pub const DEFAULT_CELL_WIDTH: f32 = 24.0;
pub const DEFAULT_CELL_HEIGHT: f32 = 16.0;

/// Default room interior size when a prefab does not give one
pub const DEFAULT_ROOM_WIDTH: f32 = 20.0;
pub const DEFAULT_ROOM_HEIGHT: f32 = 12.0;

/// Distance from a door to its entry point, towards the room center
pub const DOOR_ENTRY_INSET: f32 = 1.5;

/// Salt for the encounter stream derived from a floor seed
pub const ENCOUNTER_STREAM_SALT: u64 = 0x656e_636f_756e_7465;

/// Weight of a template's difficulty rating in the room difficulty
pub const TEMPLATE_DIFFICULTY_FACTOR: f32 = 0.5;
