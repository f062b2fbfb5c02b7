//! Attack target selection under occlusion
//!
//! A formation is read as rows (one per x column). Within a row the unit
//! nearest the attacked edge screens the ones behind it, so only the living
//! unit(s) at the extreme y of each row may be attacked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::battle::units::Unit;

/// Which army is being attacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSide {
    /// The left-positioned army; its exposed unit per row has the lowest y
    Left,
    /// The right-positioned army; its exposed unit per row has the highest y
    Right,
}

/// Group living units into rows keyed by x, rows ordered by ascending x.
///
/// Storage order is preserved within each row.
pub fn group_by_row<'a>(units: impl IntoIterator<Item = &'a Unit>) -> Vec<Vec<&'a Unit>> {
    let mut rows: BTreeMap<i32, Vec<&'a Unit>> = BTreeMap::new();
    for unit in units.into_iter().filter(|u| u.is_alive()) {
        rows.entry(unit.position.x).or_default().push(unit);
    }
    rows.into_values().collect()
}

/// Units that can legally be attacked, row by row.
///
/// Dead units neither screen nor get returned. Rows with no living units
/// contribute nothing; ties at the extreme y are all returned.
pub fn find_suitable_targets<'a>(rows: &[Vec<&'a Unit>], target_side: TargetSide) -> Vec<&'a Unit> {
    let mut suitable = Vec::new();

    for row in rows {
        let living = || row.iter().copied().filter(|u| u.is_alive());

        let edge_y = match target_side {
            TargetSide::Left => living().map(|u| u.position.y).min(),
            TargetSide::Right => living().map(|u| u.position.y).max(),
        };

        let Some(edge_y) = edge_y else {
            continue;
        };

        suitable.extend(living().filter(|u| u.position.y == edge_y));
    }

    suitable
}
