//! Tactics configuration with documented constants
//!
//! Field geometry and preset limits are collected here so the path finder,
//! the preset generator and the simulator agree on one battlefield.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    FIELD_HEIGHT, FIELD_WIDTH, MAX_UNITS_PER_TYPE, PRESET_COLUMNS,
};
use crate::core::error::{Result, TacticsError};

/// Configuration for the tactical AI systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    // === FIELD ===
    /// Number of columns on the battlefield (x axis)
    pub field_width: i32,

    /// Number of rows on the battlefield (y axis)
    ///
    /// Also bounds preset placement: a generated army stops growing once its
    /// next unit would land on this row.
    pub field_height: i32,

    // === PRESET ===
    /// Columns occupied by a generated army
    pub preset_columns: i32,

    /// Maximum units of one type in a generated army
    pub max_units_per_type: u32,

    // === SIMULATION ===
    /// Optional cap on simulation rounds
    ///
    /// `None` runs until one side is wiped out. Hosts driving decisions that
    /// may never land a hit set this to end the battle as `RoundLimit`.
    pub max_rounds: Option<u32>,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            preset_columns: PRESET_COLUMNS,
            max_units_per_type: MAX_UNITS_PER_TYPE,
            max_rounds: None,
        }
    }
}

impl TacticsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: TacticsConfig = toml::from_str(contents)?;
        config.validate().map_err(TacticsError::InvalidConfig)?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(format!(
                "field dimensions must be positive (got {}x{})",
                self.field_width, self.field_height
            ));
        }

        if self.preset_columns <= 0 || self.preset_columns > self.field_width {
            return Err(format!(
                "preset_columns ({}) must be in 1..={}",
                self.preset_columns, self.field_width
            ));
        }

        if self.max_units_per_type == 0 {
            return Err("max_units_per_type must be positive".into());
        }

        if self.max_rounds == Some(0) {
            return Err("max_rounds must be positive when set".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<TacticsConfig> = OnceLock::new();

/// Get the global tactics config (initializes with defaults if not set)
pub fn config() -> &'static TacticsConfig {
    CONFIG.get_or_init(TacticsConfig::default)
}

/// Set the global tactics config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: TacticsConfig) -> std::result::Result<(), TacticsConfig> {
    CONFIG.set(config)
}
