//! Unit model: Template → Unit → Army
//!
//! Templates are catalog entries without a position. Units are stamped from
//! templates with a fresh id and a fixed grid cell. Armies own their units
//! for the length of a battle.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::battle::grid::GridCoord;
use crate::core::types::UnitId;

/// Catalog entry describing a kind of unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub name: String,
    pub unit_type: String,
    pub health: u32,
    pub base_attack: u32,
    pub cost: u32,
    pub attack_type: String,
    /// Damage multiplier keyed by the target's unit type
    #[serde(default)]
    pub attack_bonuses: AHashMap<String, f64>,
    /// Incoming damage multiplier keyed by the attacker's attack type
    #[serde(default)]
    pub defence_bonuses: AHashMap<String, f64>,
}

impl UnitTemplate {
    pub fn new(
        unit_type: impl Into<String>,
        health: u32,
        base_attack: u32,
        cost: u32,
        attack_type: impl Into<String>,
    ) -> Self {
        let unit_type = unit_type.into();
        Self {
            name: unit_type.clone(),
            unit_type,
            health,
            base_attack,
            cost,
            attack_type: attack_type.into(),
            attack_bonuses: AHashMap::new(),
            defence_bonuses: AHashMap::new(),
        }
    }

    pub fn with_attack_bonus(mut self, target_type: impl Into<String>, multiplier: f64) -> Self {
        self.attack_bonuses.insert(target_type.into(), multiplier);
        self
    }

    pub fn with_defence_bonus(mut self, attack_type: impl Into<String>, multiplier: f64) -> Self {
        self.defence_bonuses.insert(attack_type.into(), multiplier);
        self
    }

    /// Attack per point of cost
    pub fn attack_efficiency(&self) -> f64 {
        self.base_attack as f64 / self.cost as f64
    }

    /// Health per point of cost
    pub fn health_efficiency(&self) -> f64 {
        self.health as f64 / self.cost as f64
    }
}

/// A unit placed on the battlefield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub unit_type: String,
    pub health: u32,
    pub base_attack: u32,
    pub cost: u32,
    pub attack_type: String,
    pub attack_bonuses: AHashMap<String, f64>,
    pub defence_bonuses: AHashMap<String, f64>,
    pub position: GridCoord,
}

impl Unit {
    /// Stamp a new unit from a template; the template itself is left untouched
    pub fn from_template(template: &UnitTemplate, name: String, position: GridCoord) -> Self {
        Self {
            id: UnitId::new(),
            name,
            unit_type: template.unit_type.clone(),
            health: template.health,
            base_attack: template.base_attack,
            cost: template.cost,
            attack_type: template.attack_type.clone(),
            attack_bonuses: template.attack_bonuses.clone(),
            defence_bonuses: template.defence_bonuses.clone(),
            position,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, saturating at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Multiplier applied when this unit attacks a unit of `target_type`
    pub fn attack_bonus_against(&self, target_type: &str) -> f64 {
        self.attack_bonuses.get(target_type).copied().unwrap_or(1.0)
    }

    /// Multiplier applied when this unit is hit by an `attack_type` attack
    pub fn defence_bonus_against(&self, attack_type: &str) -> f64 {
        self.defence_bonuses.get(attack_type).copied().unwrap_or(1.0)
    }
}

/// Which army a unit fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// Handle to a unit by army and storage index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRef {
    pub side: Side,
    pub index: usize,
}

impl UnitRef {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// An army: units in storage order plus their total cost
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Army {
    pub units: Vec<Unit>,
    pub points: u64,
}

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an army from units, summing their costs
    pub fn from_units(units: Vec<Unit>) -> Self {
        let points = units.iter().map(|u| u.cost as u64).sum();
        Self { units, points }
    }

    pub fn has_alive_units(&self) -> bool {
        self.units.iter().any(Unit::is_alive)
    }

    pub fn alive_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive_units().count()
    }

    pub fn total_health(&self) -> u64 {
        self.units.iter().map(|u| u.health as u64).sum()
    }

    pub fn count_of_type(&self, unit_type: &str) -> usize {
        self.units.iter().filter(|u| u.unit_type == unit_type).count()
    }

    /// Storage index of the unit with `id`
    pub fn position_of(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|u| u.id == id)
    }

    /// Reflect every unit across the field's vertical axis
    ///
    /// A preset is generated on the left edge; mirroring moves it to the
    /// right edge so it can face another preset.
    pub fn mirrored(mut self, field_width: i32) -> Self {
        for unit in &mut self.units {
            unit.position.x = field_width - 1 - unit.position.x;
        }
        self
    }
}
