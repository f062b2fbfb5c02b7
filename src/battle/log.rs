//! Battle log sinks
//!
//! The simulator reports every completed action as an (actor, target) pair.
//! Sinks are infallible: a sink problem must never abort a round.

use serde::{Deserialize, Serialize};

use crate::battle::units::Unit;
use crate::core::types::UnitId;

/// Receiver for completed actions
pub trait BattleLog {
    /// Called once per action; `target` is `None` when the actor held
    fn report(&mut self, actor: &Unit, target: Option<&Unit>);
}

/// A single recorded action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    pub sequence: u32,
    pub actor_id: UnitId,
    pub actor: String,
    pub target_id: Option<UnitId>,
    pub target: Option<String>,
    /// Target health right after the action
    pub target_health: Option<u32>,
}

impl BattleEvent {
    pub fn describe(&self) -> String {
        match (&self.target, self.target_health) {
            (Some(target), Some(0)) => format!("{} killed {}", self.actor, target),
            (Some(target), Some(hp)) => format!("{} hit {} ({} hp left)", self.actor, target, hp),
            _ => format!("{} held position", self.actor),
        }
    }
}

/// Log that keeps every event in memory
#[derive(Debug, Clone, Default)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn kills(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.target_health == Some(0))
            .count()
    }
}

impl BattleLog for BattleEventLog {
    fn report(&mut self, actor: &Unit, target: Option<&Unit>) {
        self.events.push(BattleEvent {
            sequence: self.events.len() as u32,
            actor_id: actor.id,
            actor: actor.name.clone(),
            target_id: target.map(|t| t.id),
            target: target.map(|t| t.name.clone()),
            target_health: target.map(|t| t.health),
        });
    }
}

/// Log that forwards every action to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBattleLog;

impl BattleLog for TracingBattleLog {
    fn report(&mut self, actor: &Unit, target: Option<&Unit>) {
        match target {
            Some(target) => tracing::info!(
                actor = %actor.name,
                target = %target.name,
                target_health = target.health,
                "attack"
            ),
            None => tracing::info!(actor = %actor.name, "no target"),
        }
    }
}
