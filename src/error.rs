//! Error type shared by the whole crate.

use grid_util::point::Point;
use thiserror::Error;

/// Caller mistakes. Unreachable goals are not errors; see [PathOutcome](crate::PathOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstarError {
    #[error("unknown heuristic `{0}`, expected `manhattan` or `euclidean`")]
    UnknownHeuristic(String),

    #[error("invalid walkable property name `{0}`")]
    InvalidPropertyName(String),

    #[error("tile property `{0}` is not defined by the grid")]
    UnknownProperty(String),

    #[error("node table has not been built, call refresh first")]
    NotRefreshed,

    #[error("cell {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("map parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type AstarResult<T> = Result<T, AstarError>;
