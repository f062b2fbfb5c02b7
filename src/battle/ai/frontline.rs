//! Reference attack decision: strike the nearest exposed enemy
//!
//! Legal targets come from the occlusion filter. Melee units also need a
//! walkable path to the target; ranged units do not. Among the closest
//! candidates one is picked with a seeded RNG so battles are reproducible.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battle::ai::AttackDecision;
use crate::battle::constants::RANGED_ATTACK_TYPE;
use crate::battle::grid::GridCoord;
use crate::battle::pathfinding::PathFinder;
use crate::battle::simulation::Battlefield;
use crate::battle::targeting::{find_suitable_targets, group_by_row, TargetSide};
use crate::battle::units::{Side, Unit, UnitRef};

/// Attack decision used by the headless runner and integration tests
pub struct FrontlineAttack {
    path_finder: PathFinder,
    rng: ChaCha8Rng,
    last_path: Vec<GridCoord>,
}

impl FrontlineAttack {
    /// Create with the default seed (deterministic for testing)
    pub fn new(path_finder: PathFinder) -> Self {
        Self::with_seed(path_finder, 42)
    }

    /// Create with specific RNG seed for deterministic behavior
    pub fn with_seed(path_finder: PathFinder, seed: u64) -> Self {
        Self {
            path_finder,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_path: Vec::new(),
        }
    }

    /// Approach path of the most recent attack (empty for ranged shots or holds)
    pub fn last_path(&self) -> &[GridCoord] {
        &self.last_path
    }

    fn choose_target(
        &mut self,
        actor: UnitRef,
        field: &Battlefield<'_>,
    ) -> Option<(UnitRef, Vec<GridCoord>)> {
        let attacker = field.unit(actor)?;
        let enemy = actor.side.opponent();
        let ranged = attacker.attack_type.eq_ignore_ascii_case(RANGED_ATTACK_TYPE);

        let rows = group_by_row(&field.army(enemy).units);
        let candidates = find_suitable_targets(&rows, flank_of(enemy));

        let mut closest: Vec<(&Unit, Vec<GridCoord>)> = Vec::new();
        let mut best_steps = usize::MAX;

        for target in candidates {
            let path = self
                .path_finder
                .find_path(Some(attacker), Some(target), field.all_units());

            let steps = if !path.is_empty() {
                path.len()
            } else if ranged {
                attacker.position.chebyshev_distance(&target.position) as usize + 1
            } else {
                continue;
            };

            if steps < best_steps {
                best_steps = steps;
                closest.clear();
            }
            if steps == best_steps {
                closest.push((target, if ranged { Vec::new() } else { path }));
            }
        }

        if closest.is_empty() {
            return None;
        }

        let pick = self.rng.gen_range(0..closest.len());
        let (target, path) = closest.swap_remove(pick);
        let index = field.army(enemy).position_of(target.id)?;
        Some((UnitRef::new(enemy, index), path))
    }
}

impl AttackDecision for FrontlineAttack {
    fn decide_and_act(&mut self, actor: UnitRef, field: &mut Battlefield<'_>) -> Option<UnitRef> {
        self.last_path.clear();

        let Some((target, path)) = self.choose_target(actor, field) else {
            tracing::debug!(
                "{} has no reachable target",
                field.unit(actor).map_or("?", |u| u.name.as_str())
            );
            return None;
        };

        let damage = attack_damage(field.unit(actor)?, field.unit(target)?);
        let remaining = field.unit_mut(target)?.take_damage(damage);

        tracing::debug!(
            "{} -> {}: {} damage, {} hp left, {} step path",
            field.unit(actor).map_or("?", |u| u.name.as_str()),
            field.unit(target).map_or("?", |u| u.name.as_str()),
            damage,
            remaining,
            path.len()
        );

        self.last_path = path;
        Some(target)
    }
}

/// The computer preset is laid out on the left edge, the player army on the right
fn flank_of(side: Side) -> TargetSide {
    match side {
        Side::Computer => TargetSide::Left,
        Side::Player => TargetSide::Right,
    }
}

/// Base attack scaled by the attacker's bonus against the target type and
/// the target's defence against the attack type. Never zero for a unit that
/// has any attack at all.
pub fn attack_damage(attacker: &Unit, target: &Unit) -> u32 {
    let raw = attacker.base_attack as f64
        * attacker.attack_bonus_against(&target.unit_type)
        * target.defence_bonus_against(&attacker.attack_type);
    let damage = raw.round().max(0.0) as u32;

    if attacker.base_attack > 0 {
        damage.max(1)
    } else {
        damage
    }
}
