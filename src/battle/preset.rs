//! Computer army preset generation
//!
//! Greedy fill by cost efficiency: the best attack-per-point template is
//! always tried first, with health-per-point breaking ties, subject to a
//! per-type cap and the point budget. Units are laid out row by row in a
//! narrow block of columns on the left edge of the field.

use std::cmp::Reverse;

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::battle::grid::GridCoord;
use crate::battle::units::{Army, Unit, UnitTemplate};
use crate::core::config::{config, TacticsConfig};

/// Builds point-limited armies from a template catalog
#[derive(Debug, Clone, Copy)]
pub struct PresetGenerator {
    columns: i32,
    rows: i32,
    max_units_per_type: u32,
}

impl Default for PresetGenerator {
    fn default() -> Self {
        Self::from_config(config())
    }
}

impl PresetGenerator {
    pub fn from_config(config: &TacticsConfig) -> Self {
        Self {
            columns: config.preset_columns,
            rows: config.field_height,
            max_units_per_type: config.max_units_per_type,
        }
    }

    /// Most units the placement block can hold
    pub fn capacity(&self) -> usize {
        (self.columns.max(0) * self.rows.max(0)) as usize
    }

    /// Generate an army worth at most `budget` points
    ///
    /// Degenerate input (no templates, non-positive budget) yields an empty
    /// army rather than an error.
    pub fn generate(&self, templates: &[UnitTemplate], budget: i64) -> Army {
        if templates.is_empty() || budget <= 0 || self.capacity() == 0 {
            return Army::new();
        }

        let ranked = rank_by_efficiency(templates);

        let mut units: Vec<Unit> = Vec::new();
        let mut spent: i64 = 0;
        let mut counts: AHashMap<&str, u32> = AHashMap::new();

        // Restart from the top after every pick so the globally best
        // affordable template is always preferred
        'fill: while spent < budget {
            let mut added = false;

            for &template in &ranked {
                let count = counts.get(template.unit_type.as_str()).copied().unwrap_or(0);
                if count >= self.max_units_per_type {
                    continue;
                }
                if spent + template.cost as i64 > budget {
                    continue;
                }

                let index = units.len() as i32;
                let position = GridCoord::new(index % self.columns, index / self.columns);
                if position.y >= self.rows {
                    break 'fill;
                }

                let name = format!("{} {}", template.unit_type, count + 1);
                units.push(Unit::from_template(template, name, position));
                spent += template.cost as i64;
                counts.insert(template.unit_type.as_str(), count + 1);
                added = true;
                break;
            }

            if !added {
                break;
            }
        }

        let army = Army::from_units(units);
        tracing::debug!(
            "Generated preset: {} units, {}/{} points",
            army.units.len(),
            army.points,
            budget
        );
        army
    }
}

/// Templates sorted by (attack/cost, health/cost) descending.
///
/// Zero-cost templates have no efficiency and are dropped. The sort is
/// stable, so exact ties keep catalog order.
fn rank_by_efficiency(templates: &[UnitTemplate]) -> Vec<&UnitTemplate> {
    let mut ranked: Vec<&UnitTemplate> = templates
        .iter()
        .filter(|t| {
            if t.cost == 0 {
                tracing::warn!("Skipping template '{}' with zero cost", t.name);
                return false;
            }
            true
        })
        .collect();

    ranked.sort_by_key(|t| {
        Reverse((
            OrderedFloat(t.attack_efficiency()),
            OrderedFloat(t.health_efficiency()),
        ))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PresetGenerator {
        PresetGenerator::default()
    }

    #[test]
    fn test_empty_inputs_give_empty_army() {
        let templates = vec![UnitTemplate::new("A", 10, 10, 5, "melee")];
        assert!(generator().generate(&[], 100).units.is_empty());

        let army = generator().generate(&templates, 0);
        assert!(army.units.is_empty());
        assert_eq!(army.points, 0);

        assert!(generator().generate(&templates, -5).units.is_empty());
    }

    #[test]
    fn test_prefers_best_attack_per_cost() {
        let templates = vec![
            UnitTemplate::new("A", 10, 10, 5, "melee"),
            UnitTemplate::new("B", 4, 6, 2, "melee"),
        ];
        let army = generator().generate(&templates, 20);

        assert_eq!(army.count_of_type("B"), 10);
        assert_eq!(army.count_of_type("A"), 0);
        assert_eq!(army.points, 20);
    }

    #[test]
    fn test_type_cap_then_falls_through() {
        let templates = vec![
            UnitTemplate::new("A", 10, 10, 5, "melee"),
            UnitTemplate::new("B", 4, 6, 2, "melee"),
        ];
        let army = generator().generate(&templates, 40);

        // 11 B (22 points) then A fills 18 remaining -> 3 A (15 points)
        assert_eq!(army.count_of_type("B"), 11);
        assert_eq!(army.count_of_type("A"), 3);
        assert_eq!(army.points, 37);
    }

    #[test]
    fn test_health_breaks_attack_ties() {
        let templates = vec![
            UnitTemplate::new("Frail", 5, 10, 10, "melee"),
            UnitTemplate::new("Sturdy", 50, 10, 10, "melee"),
        ];
        let army = generator().generate(&templates, 10);
        assert_eq!(army.units[0].unit_type, "Sturdy");
    }

    #[test]
    fn test_exact_ties_keep_catalog_order() {
        let templates = vec![
            UnitTemplate::new("First", 10, 10, 10, "melee"),
            UnitTemplate::new("Second", 10, 10, 10, "melee"),
        ];
        let army = generator().generate(&templates, 10);
        assert_eq!(army.units[0].unit_type, "First");
    }

    #[test]
    fn test_cheaper_template_used_when_best_unaffordable() {
        let templates = vec![
            UnitTemplate::new("Elite", 10, 30, 10, "melee"),
            UnitTemplate::new("Militia", 10, 2, 1, "melee"),
        ];
        let army = generator().generate(&templates, 13);
        assert_eq!(army.count_of_type("Elite"), 1);
        assert_eq!(army.count_of_type("Militia"), 3);
        assert_eq!(army.points, 13);
    }

    #[test]
    fn test_names_and_positions() {
        let templates = vec![UnitTemplate::new("Archer", 10, 10, 1, "ranged")];
        let army = generator().generate(&templates, 5);

        let names: Vec<&str> = army.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            ["Archer 1", "Archer 2", "Archer 3", "Archer 4", "Archer 5"]
        );
        assert_eq!(army.units[0].position, GridCoord::new(0, 0));
        assert_eq!(army.units[2].position, GridCoord::new(2, 0));
        assert_eq!(army.units[3].position, GridCoord::new(0, 1));
        assert_eq!(army.units[4].position, GridCoord::new(1, 1));
    }

    #[test]
    fn test_units_are_fresh_copies() {
        let templates = vec![UnitTemplate::new("Pikeman", 10, 10, 1, "melee")];
        let army = generator().generate(&templates, 2);
        assert_ne!(army.units[0].id, army.units[1].id);
        assert_eq!(templates[0].name, "Pikeman");
    }

    #[test]
    fn test_placement_grid_exhaustion_stops_growth() {
        let templates: Vec<UnitTemplate> = (0..10)
            .map(|i| UnitTemplate::new(format!("T{}", i), 10, 10, 1, "melee"))
            .collect();
        let army = generator().generate(&templates, 10_000);

        assert_eq!(army.units.len(), generator().capacity());
        assert_eq!(army.units.len(), 63);
        assert!(army.units.iter().all(|u| u.position.y < 21 && u.position.x < 3));
        assert_eq!(army.points, 63);
    }

    #[test]
    fn test_zero_cost_templates_are_ignored() {
        let templates = vec![
            UnitTemplate::new("Free", 10, 10, 0, "melee"),
            UnitTemplate::new("Paid", 10, 10, 5, "melee"),
        ];
        let army = generator().generate(&templates, 10);
        assert_eq!(army.count_of_type("Free"), 0);
        assert_eq!(army.count_of_type("Paid"), 2);
    }

    #[test]
    fn test_large_costs_total_without_overflow() {
        let templates = vec![UnitTemplate::new("Titan", 100, 100, 3_000_000_000, "melee")];
        let army = generator().generate(&templates, 10_000_000_000);

        assert_eq!(army.units.len(), 3);
        assert_eq!(army.points, 9_000_000_000);
    }

    #[test]
    fn test_custom_config_limits() {
        let config = TacticsConfig {
            max_units_per_type: 2,
            ..TacticsConfig::default()
        };
        let templates = vec![UnitTemplate::new("A", 1, 1, 1, "melee")];
        let army = PresetGenerator::from_config(&config).generate(&templates, 100);
        assert_eq!(army.units.len(), 2);
    }
}
