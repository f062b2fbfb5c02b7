//! Turn-based battle simulation
//!
//! Each round every living unit acts once, strongest attack first. The
//! simulator only reads liveness and attack stats; all mutation happens
//! inside the attack decision, which receives the mutable `Battlefield`.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::battle::ai::AttackDecision;
use crate::battle::log::BattleLog;
use crate::battle::units::{Army, Side, Unit, UnitRef};
use crate::core::config::{config, TacticsConfig};
use crate::core::error::{Result, TacticsError};
use crate::core::types::Round;

/// Cooperative cancellation flag shared with the hosting context
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that any simulation observing this token stop at its next boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(TacticsError::Cancelled);
        }
        Ok(())
    }
}

/// Both armies, borrowed for the duration of a battle
///
/// Decisions may change unit state through `unit_mut` but cannot add or
/// remove units, so turn queue indices stay valid for the whole round.
///
/// ```compile_fail
/// use heroes_tactics::battle::{Army, Battlefield, Side};
///
/// let mut player = Army::new();
/// let mut computer = Army::new();
/// let mut field = Battlefield::new(&mut player, &mut computer);
/// field.army_mut(Side::Player).units.clear();
/// ```
pub struct Battlefield<'a> {
    player: &'a mut Army,
    computer: &'a mut Army,
}

impl<'a> Battlefield<'a> {
    pub fn new(player: &'a mut Army, computer: &'a mut Army) -> Self {
        Self { player, computer }
    }

    pub fn army(&self, side: Side) -> &Army {
        match side {
            Side::Player => &*self.player,
            Side::Computer => &*self.computer,
        }
    }

    fn army_mut(&mut self, side: Side) -> &mut Army {
        match side {
            Side::Player => &mut *self.player,
            Side::Computer => &mut *self.computer,
        }
    }

    pub fn unit(&self, unit: UnitRef) -> Option<&Unit> {
        self.army(unit.side).units.get(unit.index)
    }

    pub fn unit_mut(&mut self, unit: UnitRef) -> Option<&mut Unit> {
        self.army_mut(unit.side).units.get_mut(unit.index)
    }

    /// Every unit on the field, living or dead, player army first
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.player.units.iter().chain(self.computer.units.iter())
    }

    pub fn both_sides_alive(&self) -> bool {
        self.player.has_alive_units() && self.computer.has_alive_units()
    }

    fn is_alive(&self, unit: UnitRef) -> bool {
        self.unit(unit).is_some_and(Unit::is_alive)
    }

    /// Living units of both armies in attack order.
    ///
    /// Gathered player first, then computer, each in storage order; the
    /// stable sort keeps that order among equal attacks.
    pub fn turn_queue(&self) -> Vec<UnitRef> {
        let mut queue: Vec<UnitRef> = [Side::Player, Side::Computer]
            .into_iter()
            .flat_map(move |side| {
                self.army(side)
                    .units
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| u.is_alive())
                    .map(move |(index, _)| UnitRef::new(side, index))
            })
            .collect();

        queue.sort_by_key(|r| Reverse(self.unit(*r).map_or(0, |u| u.base_attack)));
        queue
    }

    fn outcome(&self) -> BattleOutcome {
        match (self.player.has_alive_units(), self.computer.has_alive_units()) {
            (true, false) => BattleOutcome::PlayerVictory,
            (false, true) => BattleOutcome::ComputerVictory,
            (false, false) => BattleOutcome::MutualDestruction,
            (true, true) => BattleOutcome::RoundLimit,
        }
    }
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerVictory,
    ComputerVictory,
    /// Neither side has living units
    MutualDestruction,
    /// Both sides still stand when the configured round cap is hit
    RoundLimit,
}

/// Result of a completed battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    /// Rounds started
    pub rounds: Round,
    /// Attack decisions invoked
    pub actions: u32,
}

/// Drives a battle between two armies
#[derive(Debug, Clone, Copy)]
pub struct BattleSimulator {
    max_rounds: Option<u32>,
}

impl Default for BattleSimulator {
    fn default() -> Self {
        Self::from_config(config())
    }
}

impl BattleSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TacticsConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Run the battle until one side has no living units.
    ///
    /// Returns `Err(TacticsError::Cancelled)` if `cancel` is raised; armies
    /// keep whatever damage was already dealt.
    pub fn simulate(
        &self,
        player: &mut Army,
        computer: &mut Army,
        decision: &mut dyn AttackDecision,
        mut log: Option<&mut dyn BattleLog>,
        cancel: &CancelToken,
    ) -> Result<BattleSummary> {
        let mut field = Battlefield::new(player, computer);
        let mut rounds: Round = 0;
        let mut actions: u32 = 0;

        while field.both_sides_alive() {
            cancel.check()?;

            if self.max_rounds.is_some_and(|max| rounds >= max) {
                tracing::warn!("Round limit {} reached with both armies standing", rounds);
                break;
            }
            rounds += 1;

            let queue = field.turn_queue();
            tracing::debug!("Round {}: {} units in turn queue", rounds, queue.len());

            for actor in queue {
                cancel.check()?;

                // Killed earlier this round
                if !field.is_alive(actor) {
                    continue;
                }

                if !field.both_sides_alive() {
                    break;
                }

                let target = decision.decide_and_act(actor, &mut field);
                actions += 1;

                if let Some(log) = log.as_deref_mut() {
                    if let Some(actor_unit) = field.unit(actor) {
                        let target_unit = target.and_then(|t| field.unit(t));
                        log.report(actor_unit, target_unit);
                    }
                }
            }
        }

        let summary = BattleSummary {
            outcome: field.outcome(),
            rounds,
            actions,
        };
        tracing::info!(
            "Battle finished: {:?} after {} rounds ({} actions)",
            summary.outcome,
            summary.rounds,
            summary.actions
        );
        Ok(summary)
    }
}
