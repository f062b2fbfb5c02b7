//! Breadth-first pathfinding for attack approaches
//!
//! Uniform step cost over an 8-connected grid. Living units other than the
//! attacker and its target block movement; corpses do not.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::battle::grid::{FieldBounds, GridCoord};
use crate::battle::units::Unit;
use crate::core::config::{config, TacticsConfig};

/// Shortest-path search between two units on a bounded field
#[derive(Debug, Clone, Copy)]
pub struct PathFinder {
    bounds: FieldBounds,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::from_config(config())
    }
}

impl PathFinder {
    pub fn new(bounds: FieldBounds) -> Self {
        Self { bounds }
    }

    pub fn from_config(config: &TacticsConfig) -> Self {
        Self::new(FieldBounds::new(config.field_width, config.field_height))
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    /// Find the shortest path from `attacker` to `target`
    ///
    /// Returns the cells from start to goal inclusive, or an empty path when
    /// either unit is missing or the target cannot be reached.
    pub fn find_path<'a>(
        &self,
        attacker: Option<&Unit>,
        target: Option<&Unit>,
        existing: impl IntoIterator<Item = &'a Unit>,
    ) -> Vec<GridCoord> {
        let (Some(attacker), Some(target)) = (attacker, target) else {
            return Vec::new();
        };

        let start = attacker.position;
        let goal = target.position;

        if start == goal {
            return vec![start];
        }

        if !self.bounds.contains(start) || !self.bounds.contains(goal) {
            tracing::trace!("Path endpoint off field: {} -> {}", start, goal);
            return Vec::new();
        }

        let obstacles: AHashSet<GridCoord> = existing
            .into_iter()
            .filter(|u| u.id != attacker.id && u.id != target.id && u.is_alive())
            .map(|u| u.position)
            .collect();

        self.search(start, goal, &obstacles).unwrap_or_default()
    }

    /// BFS over free cells; `None` if the queue drains before the goal
    fn search(
        &self,
        start: GridCoord,
        goal: GridCoord,
        obstacles: &AHashSet<GridCoord>,
    ) -> Option<Vec<GridCoord>> {
        let mut queue = VecDeque::new();
        let mut came_from: AHashMap<GridCoord, GridCoord> = AHashMap::new();
        let mut visited: AHashSet<GridCoord> = AHashSet::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                return Some(reconstruct_path(&came_from, current));
            }

            for neighbor in current.neighbors() {
                if !self.bounds.contains(neighbor)
                    || obstacles.contains(&neighbor)
                    || !visited.insert(neighbor)
                {
                    continue;
                }

                came_from.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }

        tracing::trace!("No path from {} to {}", start, goal);
        None // No path found
    }
}

/// Reconstruct path from came_from map
fn reconstruct_path(
    came_from: &AHashMap<GridCoord, GridCoord>,
    mut current: GridCoord,
) -> Vec<GridCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
