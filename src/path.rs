use grid_util::point::Point;
use itertools::Itertools;

use crate::{COST_DIAGONAL, COST_ORTHOGONAL};

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathOutcome {
    /// The requested goal was reached.
    Found,
    /// The goal was unreachable and the path leads to the explored cell closest to it.
    Closest,
    /// The goal was unreachable and closest-match fallback is disabled, or the grid is empty.
    NoPath,
}

/// Result of a single [find_path](crate::Pathfinder::find_path) call.
///
/// `nodes` runs from the achieved goal back towards the start and never contains the start
/// itself. Use [route](Self::route) for a start-first sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub nodes: Vec<Point>,
    pub start: Option<Point>,
    /// The cell the path leads to. Differs from `requested_goal` for [PathOutcome::Closest].
    pub goal: Option<Point>,
    pub requested_goal: Option<Point>,
    /// Every cell added to the open set after the start, in insertion order. Empty unless debug
    /// tracking is enabled.
    pub visited: Vec<Point>,
    outcome: PathOutcome,
}

impl PathResult {
    pub(crate) fn new(
        nodes: Vec<Point>,
        start: Point,
        goal: Point,
        requested_goal: Point,
        visited: Vec<Point>,
        outcome: PathOutcome,
    ) -> PathResult {
        PathResult {
            nodes,
            start: Some(start),
            goal: Some(goal),
            requested_goal: Some(requested_goal),
            visited,
            outcome,
        }
    }

    /// The result of searching a grid without cells.
    pub(crate) fn empty() -> PathResult {
        PathResult {
            nodes: Vec::new(),
            start: None,
            goal: None,
            requested_goal: None,
            visited: Vec::new(),
            outcome: PathOutcome::NoPath,
        }
    }

    pub fn outcome(&self) -> PathOutcome {
        self.outcome
    }
    pub fn is_found(&self) -> bool {
        self.outcome == PathOutcome::Found
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The path from the start to the achieved goal, both included. Empty for
    /// [PathOutcome::NoPath].
    pub fn route(&self) -> Vec<Point> {
        match (self.outcome, self.start) {
            (PathOutcome::NoPath, _) | (_, None) => Vec::new(),
            (_, Some(start)) => std::iter::once(start)
                .chain(self.nodes.iter().rev().copied())
                .collect(),
        }
    }

    /// Sum of the edge costs along [route](Self::route).
    pub fn cost(&self) -> f64 {
        self.route()
            .into_iter()
            .tuple_windows()
            .map(|(a, b)| {
                if a.x != b.x && a.y != b.y {
                    COST_DIAGONAL
                } else {
                    COST_ORTHOGONAL
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(nodes: &[(i32, i32)], outcome: PathOutcome) -> PathResult {
        let nodes: Vec<Point> = nodes.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let goal = nodes.first().copied().unwrap_or(Point::new(0, 0));
        PathResult::new(nodes, Point::new(0, 0), goal, goal, Vec::new(), outcome)
    }

    #[test]
    fn route_prepends_start_and_runs_forward() {
        let path = result(&[(2, 1), (1, 1), (1, 0)], PathOutcome::Found);
        assert_eq!(
            path.route(),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(2, 1)
            ]
        );
    }

    #[test]
    fn cost_counts_diagonals() {
        let path = result(&[(2, 2), (1, 1)], PathOutcome::Found);
        assert!((path.cost() - 2.0 * COST_DIAGONAL).abs() < 1e-9);
        // (0, 0) -> (1, 0) -> (2, 1) -> (2, 2)
        let path = result(&[(2, 2), (2, 1), (1, 0)], PathOutcome::Closest);
        assert!((path.cost() - (COST_DIAGONAL + 2.0)).abs() < 1e-9);
        let path = result(&[(1, 2), (1, 1), (0, 1)], PathOutcome::Found);
        assert!((path.cost() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn start_equal_to_goal() {
        let path = result(&[], PathOutcome::Found);
        assert_eq!(path.route(), vec![Point::new(0, 0)]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn no_path_has_no_route() {
        let path = result(&[], PathOutcome::NoPath);
        assert!(path.route().is_empty());
        assert!(!path.is_found());
        assert!(PathResult::empty().route().is_empty());
    }
}
