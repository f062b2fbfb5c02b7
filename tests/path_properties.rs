//! Property tests for attack pathfinding

use std::collections::VecDeque;

use heroes_tactics::battle::{FieldBounds, GridCoord, PathFinder, Unit, UnitTemplate};
use proptest::prelude::*;

fn unit_at(x: i32, y: i32) -> Unit {
    let template = UnitTemplate::new("Pikeman", 10, 5, 3, "melee");
    Unit::from_template(&template, format!("Pikeman {},{}", x, y), GridCoord::new(x, y))
}

/// Independent BFS distance in cells (inclusive), or None if unreachable
fn reference_cells(start: GridCoord, goal: GridCoord, blocked: &[GridCoord]) -> Option<usize> {
    let bounds = FieldBounds::default();
    let width = bounds.width as usize;
    let idx = |c: GridCoord| c.y as usize * width + c.x as usize;

    let mut dist = vec![usize::MAX; (bounds.width * bounds.height) as usize];
    let mut queue = VecDeque::new();
    dist[idx(start)] = 1;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[idx(current)]);
        }
        for dx in -1..=1 {
            for dy in -1..=1 {
                let next = GridCoord::new(current.x + dx, current.y + dy);
                if (dx, dy) == (0, 0) || !bounds.contains(next) || blocked.contains(&next) {
                    continue;
                }
                if dist[idx(next)] == usize::MAX {
                    dist[idx(next)] = dist[idx(current)] + 1;
                    queue.push_back(next);
                }
            }
        }
    }
    None
}

fn cell() -> impl Strategy<Value = (i32, i32)> {
    (0i32..27, 0i32..21)
}

proptest! {
    #[test]
    fn prop_path_is_shortest_and_connected(
        start in cell(),
        goal in cell(),
        obstacles in prop::collection::vec(cell(), 0..120),
    ) {
        let attacker = unit_at(start.0, start.1);
        let target = unit_at(goal.0, goal.1);
        let blockers: Vec<Unit> = obstacles
            .iter()
            .map(|&(x, y)| unit_at(x, y))
            .filter(|u| u.position != attacker.position && u.position != target.position)
            .collect();
        let blocked: Vec<GridCoord> = blockers.iter().map(|u| u.position).collect();

        let path = PathFinder::default().find_path(Some(&attacker), Some(&target), &blockers);

        match reference_cells(attacker.position, target.position, &blocked) {
            Some(cells) => {
                prop_assert_eq!(path.len(), cells);
                prop_assert_eq!(path.first(), Some(&attacker.position));
                prop_assert_eq!(path.last(), Some(&target.position));
                for pair in path.windows(2) {
                    prop_assert!(pair[0].is_adjacent(&pair[1]));
                }
                for step in &path {
                    prop_assert!(!blocked.contains(step));
                }
            }
            None => prop_assert!(path.is_empty()),
        }
    }

    #[test]
    fn prop_dead_obstacles_never_block(
        start in cell(),
        goal in cell(),
        obstacles in prop::collection::vec(cell(), 0..200),
    ) {
        let attacker = unit_at(start.0, start.1);
        let target = unit_at(goal.0, goal.1);
        let corpses: Vec<Unit> = obstacles
            .iter()
            .map(|&(x, y)| {
                let mut u = unit_at(x, y);
                u.take_damage(u32::MAX);
                u
            })
            .collect();

        let path = PathFinder::default().find_path(Some(&attacker), Some(&target), &corpses);
        let open_field = reference_cells(attacker.position, target.position, &[]);

        prop_assert_eq!(Some(path.len()), open_field);
    }
}
