use log::warn;

use crate::error::{AstarError, AstarResult};
use crate::heuristic::Heuristic;

pub const DEFAULT_WALKABLE_PROPERTY: &str = "walkable";

/// Per-engine search settings. Every field is fixed for the duration of a query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AstarConfig {
    /// Allow the four diagonal moves (corner cutting is never allowed).
    pub use_diagonal: bool,
    /// Return a path to the closest explored cell when the goal cannot be reached.
    pub find_closest: bool,
    /// Tile property consulted by [refresh](crate::Pathfinder::refresh).
    pub walkable_property: String,
    pub heuristic: Heuristic,
    /// Record every node added to the open set in
    /// [PathResult::visited](crate::PathResult::visited).
    pub debug_tracking: bool,
}

impl Default for AstarConfig {
    fn default() -> AstarConfig {
        AstarConfig {
            use_diagonal: true,
            find_closest: true,
            walkable_property: DEFAULT_WALKABLE_PROPERTY.to_owned(),
            heuristic: Heuristic::Euclidean,
            debug_tracking: true,
        }
    }
}

impl AstarConfig {
    pub fn with_diagonal(mut self, use_diagonal: bool) -> Self {
        self.use_diagonal = use_diagonal;
        self
    }
    pub fn with_find_closest(mut self, find_closest: bool) -> Self {
        self.find_closest = find_closest;
        self
    }
    pub fn with_walkable_property(mut self, name: impl Into<String>) -> Self {
        self.walkable_property = name.into();
        self
    }
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
    pub fn with_debug_tracking(mut self, debug_tracking: bool) -> Self {
        self.debug_tracking = debug_tracking;
        self
    }

    /// Rejects settings that could only come from a caller mistake.
    pub fn validate(&self) -> AstarResult<()> {
        validate_property_name(&self.walkable_property)
    }
}

pub(crate) fn validate_property_name(name: &str) -> AstarResult<()> {
    if name.trim().is_empty() {
        warn!("Rejecting empty walkable property name {:?}", name);
        return Err(AstarError::InvalidPropertyName(name.to_owned()));
    }
    Ok(())
}
