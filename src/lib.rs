//! Heroes Tactics - tactical AI core for turn-based grid battles

pub mod battle;
pub mod core;
