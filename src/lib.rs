//! # tile_astar
//!
//! A* pathfinding on tile grids. Cells are walkable or blocked according to a string property
//! of their tile (by default `walkable`, where only the literal value `"false"` blocks).
//! Movement is 4- or 8-connected; diagonal moves never cut a blocked corner. When the goal
//! cannot be reached the search can return a path to the explored cell closest to it instead,
//! which is usually what a game actor wants.
//!
//! ```
//! use grid_util::point::Point;
//! use tile_astar::{AstarConfig, Pathfinder, PathOutcome, TileMap};
//!
//! let map = TileMap::from_ascii(
//!     "
//!     ....
//!     .##.
//!     ....
//!     ",
//! )
//! .unwrap();
//! let mut pathfinder = Pathfinder::from_grid(&map, AstarConfig::default()).unwrap();
//! let path = pathfinder.find_path(Point::new(0, 1), Point::new(3, 1)).unwrap();
//! assert_eq!(path.outcome(), PathOutcome::Found);
//! // Runs from the goal back towards the start, start excluded
//! assert_eq!(path.nodes.first(), Some(&Point::new(3, 1)));
//! ```
//!
//! A [Pathfinder] owns its node table and per-query scores, so one instance serves one query at
//! a time. Separate instances are independent.
pub mod astar;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod path;
pub mod pathing_grid;
pub mod tile_map;

use core::fmt;

use grid_util::point::Point;
use log::{info, warn};

pub use crate::config::AstarConfig;
pub use crate::error::{AstarError, AstarResult};
pub use crate::heuristic::Heuristic;
pub use crate::path::{PathOutcome, PathResult};
pub use crate::pathing_grid::{PathingGrid, SearchNode};
pub use crate::tile_map::{TileGrid, TileMap, TileSet};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cost of a move to a west, east, north or south neighbour.
pub const COST_ORTHOGONAL: f64 = 1.0;
/// Cost of a diagonal move.
pub const COST_DIAGONAL: f64 = COST_ORTHOGONAL * std::f64::consts::SQRT_2;

pub const N_SMALLVEC_SIZE: usize = 8;

/// The search engine: a node table built from a [TileGrid], the active [AstarConfig] and the
/// most recent [PathResult].
#[derive(Clone, Debug)]
pub struct Pathfinder {
    config: AstarConfig,
    grid: PathingGrid,
    last_path: Option<PathResult>,
}

impl Pathfinder {
    /// Creates an engine without a node table. Call [refresh](Self::refresh) before searching.
    pub fn new(config: AstarConfig) -> AstarResult<Pathfinder> {
        config.validate()?;
        Ok(Pathfinder {
            grid: PathingGrid::new(config.use_diagonal),
            config,
            last_path: None,
        })
    }

    /// Creates an engine and builds its node table from `grid`.
    pub fn from_grid<G: TileGrid + ?Sized>(
        grid: &G,
        config: AstarConfig,
    ) -> AstarResult<Pathfinder> {
        let mut pathfinder = Pathfinder::new(config)?;
        pathfinder.refresh(grid)?;
        Ok(pathfinder)
    }

    /// Rebuilds the node table from the current walkability of `grid`. Must be called again after
    /// any change to the map.
    pub fn refresh<G: TileGrid + ?Sized>(&mut self, grid: &G) -> AstarResult<()> {
        let property = &self.config.walkable_property;
        if !grid.knows_property(property) {
            warn!("Grid does not define tile property {:?}", property);
            return Err(AstarError::UnknownProperty(property.clone()));
        }
        self.grid.refresh(grid, property);
        Ok(())
    }

    fn checked_ix(&self, point: Point) -> AstarResult<usize> {
        self.grid.index_of(&point).ok_or(AstarError::OutOfBounds {
            point,
            width: self.grid.width(),
            height: self.grid.height(),
        })
    }

    /// Computes a path from `start` to `goal`. An unreachable goal is reported through
    /// [PathResult::outcome], not as an error. The result is also kept as
    /// [last_path](Self::last_path).
    pub fn find_path(&mut self, start: Point, goal: Point) -> AstarResult<PathResult> {
        if !self.grid.is_refreshed() {
            return Err(AstarError::NotRefreshed);
        }
        let result = if self.grid.is_empty() {
            info!("Node table is empty, no path from {} to {}", start, goal);
            PathResult::empty()
        } else {
            let start_ix = self.checked_ix(start)?;
            let goal_ix = self.checked_ix(goal)?;
            astar::astar(&mut self.grid, &self.config, start_ix, goal_ix)
        };
        self.last_path = Some(result.clone());
        Ok(result)
    }

    /// Cached walkability of a cell; does not consult the map. Out-of-bounds cells are not
    /// walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }

    /// Checks whether `goal` can be reached from `start` using the precomputed components.
    pub fn reachable(&self, start: Point, goal: Point) -> AstarResult<bool> {
        if !self.grid.is_refreshed() {
            return Err(AstarError::NotRefreshed);
        }
        if self.grid.is_empty() {
            return Ok(false);
        }
        self.checked_ix(start)?;
        self.checked_ix(goal)?;
        Ok(self.grid.reachable(&start, &goal))
    }

    pub fn last_path(&self) -> Option<&PathResult> {
        self.last_path.as_ref()
    }
    pub fn config(&self) -> &AstarConfig {
        &self.config
    }
    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn set_use_diagonal(&mut self, use_diagonal: bool) {
        self.config.use_diagonal = use_diagonal;
        if self.grid.allow_diagonal_move != use_diagonal {
            self.grid.allow_diagonal_move = use_diagonal;
            if self.grid.is_refreshed() {
                self.grid.generate_components();
            }
        }
    }
    pub fn set_find_closest(&mut self, find_closest: bool) {
        self.config.find_closest = find_closest;
    }
    pub fn set_debug_tracking(&mut self, debug_tracking: bool) {
        self.config.debug_tracking = debug_tracking;
    }
    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.config.heuristic = heuristic;
    }
    pub fn set_heuristic_by_name(&mut self, name: &str) -> AstarResult<()> {
        self.config.heuristic = name.parse()?;
        Ok(())
    }
    /// Takes effect on the next [refresh](Self::refresh).
    pub fn set_walkable_property(&mut self, name: impl Into<String>) -> AstarResult<()> {
        let name = name.into();
        config::validate_property_name(&name)?;
        self.config.walkable_property = name;
        Ok(())
    }
}

impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Pathfinder ({}, diagonal: {}, closest: {})",
            self.config.heuristic, self.config.use_diagonal, self.config.find_closest
        )?;
        write!(f, "{}", self.grid)
    }
}
