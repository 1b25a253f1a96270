use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::warn;

use crate::error::AstarError;

/// Distance estimate used to rank open nodes. Both variants are admissible for their movement
/// model: [Heuristic::Manhattan] for 4-connected search and [Heuristic::Euclidean] when diagonal
/// moves are allowed (Manhattan overestimates diagonal steps).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    Manhattan,
    #[default]
    Euclidean,
}

impl Heuristic {
    pub fn distance(self, p1: &Point, p2: &Point) -> f64 {
        match self {
            Heuristic::Manhattan => p1.manhattan_distance(p2) as f64,
            Heuristic::Euclidean => {
                let dx = (p1.x - p2.x) as f64;
                let dy = (p1.y - p2.y) as f64;
                dx.hypot(dy)
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `manhattan`/`euclidean` in any case, as well as the tilemap plugin spellings
/// `distManhattan`/`distEuclidian`.
impl FromStr for Heuristic {
    type Err = AstarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" | "distmanhattan" => Ok(Heuristic::Manhattan),
            "euclidean" | "euclidian" | "disteuclidian" | "disteuclidean" => {
                Ok(Heuristic::Euclidean)
            }
            _ => {
                warn!("Rejecting unknown heuristic {:?}", s);
                Err(AstarError::UnknownHeuristic(s.to_owned()))
            }
        }
    }
}
