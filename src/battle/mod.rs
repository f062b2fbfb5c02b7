//! Battle system - tactical AI for turn-based grid combat
//!
//! Key pieces:
//! - Preset generation builds the computer army under a point budget
//! - Occlusion filtering decides which enemies are legal targets
//! - BFS pathfinding plans the approach across an occupied grid
//! - The simulator runs rounds until one army is wiped out

pub mod ai;
pub mod catalog;
pub mod constants;
pub mod grid;
pub mod log;
pub mod pathfinding;
pub mod preset;
pub mod simulation;
pub mod targeting;
pub mod units;

// Re-exports for convenient access
pub use ai::{AttackDecision, FrontlineAttack};
pub use catalog::UnitCatalog;
pub use constants::*;
pub use grid::{FieldBounds, GridCoord, DIRECTIONS};
pub use log::{BattleEvent, BattleEventLog, BattleLog, TracingBattleLog};
pub use pathfinding::PathFinder;
pub use preset::PresetGenerator;
pub use simulation::{
    BattleOutcome, BattleSimulator, BattleSummary, Battlefield, CancelToken,
};
pub use targeting::{find_suitable_targets, group_by_row, TargetSide};
pub use units::{Army, Side, Unit, UnitRef, UnitTemplate};
