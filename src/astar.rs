//! Best-first search over the node table.
//!
//! The open and closed sets are insertion-ordered, so the minimum-`f` scan keeps the first node
//! found on ties and the result is reproducible for a given grid, start and goal.
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, trace};

use crate::config::AstarConfig;
use crate::path::{PathOutcome, PathResult};
use crate::pathing_grid::PathingGrid;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Position in `open` and node index of the first node with the smallest `f`.
fn select_min(grid: &PathingGrid, open: &FxIndexSet<usize>) -> Option<(usize, usize)> {
    let mut iter = open.iter().copied().enumerate();
    let (mut best_pos, mut best) = iter.next()?;
    let mut f = grid.node(best).f;
    for (pos, ix) in iter {
        let node_f = grid.node(ix).f;
        if node_f < f {
            best_pos = pos;
            best = ix;
            f = node_f;
        }
    }
    Some((best_pos, best))
}

/// Follows parent links from `ix`, collecting each point until a node without parent is
/// reached. That last node, the start, is not included.
pub fn reconstruct_path(grid: &PathingGrid, ix: usize) -> Vec<Point> {
    let mut solution = Vec::new();
    let mut current = ix;
    while let Some(parent) = grid.node(current).parent {
        solution.push(grid.node(current).point);
        current = parent;
    }
    solution
}

/// The explored node closest to the goal, first found on ties.
fn closest_explored(
    grid: &PathingGrid,
    config: &AstarConfig,
    closed: &FxIndexSet<usize>,
    goal: &Point,
) -> Option<usize> {
    let mut min = f64::INFINITY;
    let mut closest = None;
    for &ix in closed {
        let dist = config.heuristic.distance(goal, &grid.node(ix).point);
        if dist < min {
            min = dist;
            closest = Some(ix);
        }
    }
    closest
}

fn points(grid: &PathingGrid, set: &FxIndexSet<usize>) -> Vec<Point> {
    set.iter().map(|&ix| grid.node(ix).point).collect()
}

/// Runs A* from node `start` to node `goal`, both valid indices into `grid`. Falls back to the
/// closest explored node when the goal cannot be reached and `config.find_closest` is set.
pub fn astar(
    grid: &mut PathingGrid,
    config: &AstarConfig,
    start: usize,
    goal: usize,
) -> PathResult {
    let heuristic = config.heuristic;
    let start_point = grid.node(start).point;
    let goal_point = grid.node(goal).point;
    debug!(
        "Searching {} -> {} (heuristic: {}, diagonal: {}, closest: {})",
        start_point, goal_point, heuristic, grid.allow_diagonal_move, config.find_closest
    );

    let mut open = FxIndexSet::default();
    let mut closed = FxIndexSet::default();
    let mut visited = FxIndexSet::default();

    let h = heuristic.distance(&start_point, &goal_point);
    grid.node_mut(start).score(None, 0.0, h);
    open.insert(start);

    while let Some((pos, current)) = select_min(grid, &open) {
        if current == goal {
            let nodes = reconstruct_path(grid, goal);
            debug!(
                "Reached {} in {} steps, {} nodes closed",
                goal_point,
                nodes.len(),
                closed.len()
            );
            return PathResult::new(
                nodes,
                start_point,
                goal_point,
                goal_point,
                points(grid, &visited),
                PathOutcome::Found,
            );
        }

        open.shift_remove_index(pos);
        closed.insert(current);

        let g = grid.node(current).g;
        trace!("Expanding {} (g = {:.3})", grid.node(current).point, g);
        for (n, edge_cost) in grid.neighbours(current) {
            grid.node_mut(n).edge_cost = edge_cost;
            if closed.contains(&n) {
                continue;
            }
            let tentative_g = g + edge_cost;
            let improved = if open.insert(n) {
                if config.debug_tracking {
                    visited.insert(n);
                }
                true
            } else {
                tentative_g < grid.node(n).g
            };
            if improved {
                let h = heuristic.distance(&grid.node(n).point, &goal_point);
                grid.node_mut(n).score(Some(current), tentative_g, h);
            }
        }
    }

    let visited = points(grid, &visited);
    if config.find_closest {
        if let Some(closest) = closest_explored(grid, config, &closed, &goal_point) {
            let closest_point = grid.node(closest).point;
            info!(
                "{} is not reachable from {}, pathing to closest explored cell {}",
                goal_point, start_point, closest_point
            );
            return PathResult::new(
                reconstruct_path(grid, closest),
                start_point,
                closest_point,
                goal_point,
                visited,
                PathOutcome::Closest,
            );
        }
    }
    info!("{} is not reachable from {}", goal_point, start_point);
    PathResult::new(
        Vec::new(),
        start_point,
        goal_point,
        goal_point,
        visited,
        PathOutcome::NoPath,
    )
}
