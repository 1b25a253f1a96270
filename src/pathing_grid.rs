use core::fmt;

use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::tile_map::TileGrid;
use crate::{COST_DIAGONAL, COST_ORTHOGONAL, N_SMALLVEC_SIZE};

/// One record per cell. `walkable` is fixed at refresh time; the score fields belong to the
/// query that last touched the node and are written when the node enters the open set.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub point: Point,
    pub walkable: bool,
    /// Cost of the best known path from the start.
    pub g: f64,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Index of the predecessor on the best known path.
    pub parent: Option<usize>,
    /// Cost of the edge by which the node was last enumerated as a neighbour.
    pub edge_cost: f64,
}

impl SearchNode {
    pub fn new(point: Point, walkable: bool) -> SearchNode {
        SearchNode {
            point,
            walkable,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            edge_cost: 0.0,
        }
    }

    pub(crate) fn score(&mut self, parent: Option<usize>, g: f64, h: f64) {
        self.parent = parent;
        self.g = g;
        self.h = h;
        self.f = g + h;
    }
}

/// Row-major node table built from a [TileGrid]. Maintains the connected components of the
/// walkable cells under the current movement rule using a [UnionFind].
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    pub(crate) nodes: Vec<SearchNode>,
    pub components: UnionFind<usize>,
    pub allow_diagonal_move: bool,
    refreshed: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            width: 0,
            height: 0,
            nodes: Vec::new(),
            components: UnionFind::new(0),
            allow_diagonal_move: true,
            refreshed: false,
        }
    }
}

impl PathingGrid {
    pub fn new(allow_diagonal_move: bool) -> PathingGrid {
        PathingGrid {
            allow_diagonal_move,
            ..PathingGrid::default()
        }
    }

    /// Rebuilds every node from the walkability the grid reports under `property`, then
    /// regenerates the components.
    pub fn refresh<G: TileGrid + ?Sized>(&mut self, grid: &G, property: &str) {
        let (w, h) = (grid.width(), grid.height());
        self.width = w;
        self.height = h;
        self.nodes.clear();
        self.nodes.reserve(w * h);
        for y in 0..h {
            for x in 0..w {
                let point = Point::new(x as i32, y as i32);
                self.nodes
                    .push(SearchNode::new(point, grid.is_walkable(x, y, property)));
            }
        }
        self.refreshed = true;
        self.generate_components();
        info!(
            "Refreshed {}x{} node table, {} walkable cells",
            w,
            h,
            self.walkable_count()
        );
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn is_refreshed(&self) -> bool {
        self.refreshed
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of an in-bounds point.
    pub fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    pub fn index_of(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point.x, point.y)
            .then(|| self.get_ix_point(point))
    }

    pub fn node(&self, ix: usize) -> &SearchNode {
        &self.nodes[ix]
    }

    pub(crate) fn node_mut(&mut self, ix: usize) -> &mut SearchNode {
        &mut self.nodes[ix]
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Cached walkability. Out-of-bounds cells are not walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.nodes[y as usize * self.width + x as usize].walkable
    }

    pub fn walkable_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.walkable).count()
    }

    /// Walkable neighbours of the node at `ix` with the cost of the connecting edge, in the order
    /// west, east, north, south, then north-west, north-east, south-west, south-east. North is
    /// `y - 1`. A diagonal is only produced when both orthogonal cells it passes are walkable.
    pub fn neighbours(&self, ix: usize) -> SmallVec<[(usize, f64); N_SMALLVEC_SIZE]> {
        let p = self.nodes[ix].point;
        let mut succ = SmallVec::new();
        let w = self.is_walkable(p.x - 1, p.y);
        let e = self.is_walkable(p.x + 1, p.y);
        let n = self.is_walkable(p.x, p.y - 1);
        let s = self.is_walkable(p.x, p.y + 1);
        for (open, dx, dy) in [(w, -1, 0), (e, 1, 0), (n, 0, -1), (s, 0, 1)] {
            if open {
                succ.push((self.get_ix_point(&Point::new(p.x + dx, p.y + dy)), COST_ORTHOGONAL));
            }
        }
        if !self.allow_diagonal_move {
            return succ;
        }
        for (sides, dx, dy) in [
            (w && n, -1, -1),
            (e && n, 1, -1),
            (w && s, -1, 1),
            (e && s, 1, 1),
        ] {
            if sides && self.is_walkable(p.x + dx, p.y + dy) {
                succ.push((self.get_ix_point(&Point::new(p.x + dx, p.y + dy)), COST_DIAGONAL));
            }
        }
        succ
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.index_of(start), self.index_of(goal)) {
            (Some(s), Some(g)) => {
                self.nodes[s].walkable && self.nodes[g].walkable && self.components.equiv(s, g)
            }
            _ => false,
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.nodes.len());
        for ix in 0..self.nodes.len() {
            if self.nodes[ix].walkable {
                for (n, _) in self.neighbours(ix) {
                    self.components.union(ix, n);
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.nodes.chunks(self.width.max(1)) {
            let line: String = row
                .iter()
                .map(|n| if n.walkable { '.' } else { '#' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
