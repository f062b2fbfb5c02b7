//! Battle field constants - all tunable values in one place

// Field geometry (cells)
pub const FIELD_WIDTH: i32 = 27;
pub const FIELD_HEIGHT: i32 = 21;

// Preset generation
pub const PRESET_COLUMNS: i32 = 3;
pub const MAX_UNITS_PER_TYPE: u32 = 11;

// Attack type tag that lets a unit strike without a walkable path
pub const RANGED_ATTACK_TYPE: &str = "ranged";
