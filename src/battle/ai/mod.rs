//! Unit attack decisions
//!
//! Architecture: the simulator depends only on the `AttackDecision` trait.
//! Implementations pick a legal target, deal damage, and report who they hit.

mod frontline;

pub use frontline::FrontlineAttack;

use crate::battle::simulation::Battlefield;
use crate::battle::units::UnitRef;

/// Per-unit attack capability invoked once per turn
pub trait AttackDecision {
    /// Choose a target for `actor`, apply the attack, and return the unit hit.
    ///
    /// `None` means the actor held this turn. Implementations own all
    /// mutation of the battlefield.
    fn decide_and_act(&mut self, actor: UnitRef, field: &mut Battlefield<'_>) -> Option<UnitRef>;
}
