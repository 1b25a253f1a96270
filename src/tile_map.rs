//! The map side of the engine: anything that can tell the node table which cells are walkable.
//!
//! The engine only ever sees a [TileGrid]. [TileMap] is a small in-memory implementation
//! shaped like a tilemap layer plus a tileset with per-tile string properties.
use fxhash::FxHashMap;
use log::debug;

use crate::error::{AstarError, AstarResult};

/// Property value that marks a tile as not walkable. Any other value, or no value at all, is
/// walkable.
pub const NOT_WALKABLE: &str = "false";

pub trait TileGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Looks up a string property of the tile at `(x, y)`. `x < width` and `y < height`.
    fn tile_property(&self, x: usize, y: usize, name: &str) -> Option<&str>;

    /// Whether `name` is a property this grid knows about at all. Grids without a property
    /// schema accept every name.
    fn knows_property(&self, _name: &str) -> bool {
        true
    }

    fn is_walkable(&self, x: usize, y: usize, property: &str) -> bool {
        self.tile_property(x, y, property) != Some(NOT_WALKABLE)
    }
}

/// Per-tile properties, indexed by tile id.
#[derive(Clone, Debug, Default)]
pub struct TileSet {
    properties: FxHashMap<u32, FxHashMap<String, String>>,
}

impl TileSet {
    pub fn new() -> TileSet {
        TileSet::default()
    }

    pub fn set_property(&mut self, tile: u32, name: impl Into<String>, value: impl Into<String>) {
        self.properties
            .entry(tile)
            .or_default()
            .insert(name.into(), value.into());
    }

    pub fn property(&self, tile: u32, name: &str) -> Option<&str> {
        self.properties
            .get(&tile)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }

    /// True if some tile defines `name`, or if no tile defines any property.
    pub fn defines(&self, name: &str) -> bool {
        self.properties.values().all(|props| props.is_empty())
            || self
                .properties
                .values()
                .any(|props| props.contains_key(name))
    }
}

/// A single tile layer stored row-major. `None` cells hold no tile and therefore no properties.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<Option<u32>>,
    pub tileset: TileSet,
}

impl TileMap {
    pub fn new(width: usize, height: usize, fill: Option<u32>, tileset: TileSet) -> TileMap {
        TileMap {
            width,
            height,
            tiles: vec![fill; width * height],
            tileset,
        }
    }

    /// Builds a map from rows of `.` (walkable floor, tile 0) and `#` (wall, tile 1). The wall
    /// tile carries `walkable = "false"`. Blank lines are skipped and all rows must have the same
    /// length.
    pub fn from_ascii(text: &str) -> AstarResult<TileMap> {
        Self::from_ascii_with_property(text, crate::config::DEFAULT_WALKABLE_PROPERTY)
    }

    /// Like [from_ascii](Self::from_ascii) but stores the wall flag under `property`.
    pub fn from_ascii_with_property(text: &str, property: &str) -> AstarResult<TileMap> {
        let mut tileset = TileSet::new();
        tileset.set_property(0, property, "true");
        tileset.set_property(1, property, NOT_WALKABLE);

        let mut width = None;
        let mut height = 0;
        let mut tiles = Vec::new();
        for (ix, line) in text.lines().enumerate() {
            let row = line.trim();
            if row.is_empty() {
                continue;
            }
            let row_width = row.chars().count();
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(AstarError::Parse {
                        line: ix + 1,
                        message: format!("expected {} cells, found {}", w, row_width),
                    })
                }
                Some(_) => {}
            }
            for c in row.chars() {
                let tile = match c {
                    '.' => 0,
                    '#' => 1,
                    other => {
                        return Err(AstarError::Parse {
                            line: ix + 1,
                            message: format!("unknown glyph {:?}", other),
                        })
                    }
                };
                tiles.push(Some(tile));
            }
            height += 1;
        }
        let width = width.unwrap_or(0);
        debug!("Parsed {}x{} ascii map", width, height);
        Ok(TileMap {
            width,
            height,
            tiles,
            tileset,
        })
    }

    fn ix(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) outside {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the map.
    pub fn tile(&self, x: usize, y: usize) -> Option<u32> {
        self.tiles[self.ix(x, y)]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the map.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Option<u32>) {
        let ix = self.ix(x, y);
        self.tiles[ix] = tile;
    }
}

impl TileGrid for TileMap {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
    fn tile_property(&self, x: usize, y: usize, name: &str) -> Option<&str> {
        self.tile(x, y)
            .and_then(|tile| self.tileset.property(tile, name))
    }
    fn knows_property(&self, name: &str) -> bool {
        self.tileset.defines(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_false_blocks() {
        let mut tileset = TileSet::new();
        tileset.set_property(0, "walkable", "false");
        tileset.set_property(1, "walkable", "no");
        tileset.set_property(2, "walkable", "FALSE");
        let mut map = TileMap::new(4, 1, None, tileset);
        map.set_tile(0, 0, Some(0));
        map.set_tile(1, 0, Some(1));
        map.set_tile(2, 0, Some(2));
        assert!(!map.is_walkable(0, 0, "walkable"));
        assert!(map.is_walkable(1, 0, "walkable"));
        assert!(map.is_walkable(2, 0, "walkable"));
        // Empty cell has no properties
        assert!(map.is_walkable(3, 0, "walkable"));
    }

    #[test]
    fn ascii_map_layout() {
        let map = TileMap::from_ascii(
            "
            .#.
            ...
            ",
        )
        .unwrap();
        assert_eq!((map.width(), map.height()), (3, 2));
        assert!(map.is_walkable(0, 0, "walkable"));
        assert!(!map.is_walkable(1, 0, "walkable"));
        assert!(map.is_walkable(1, 1, "walkable"));
    }

    #[test]
    #[should_panic(expected = "outside 3x2 map")]
    fn set_tile_past_row_end_panics() {
        let mut map = TileMap::new(3, 2, Some(0), TileSet::new());
        // (3, 0) would alias (0, 1) in the row-major layout
        map.set_tile(3, 0, Some(1));
    }

    #[test]
    #[should_panic(expected = "outside 3x2 map")]
    fn tile_below_last_row_panics() {
        let map = TileMap::new(3, 2, Some(0), TileSet::new());
        map.tile(0, 2);
    }

    #[test]
    fn ascii_map_rejects_ragged_rows() {
        let err = TileMap::from_ascii("...\n..").unwrap_err();
        assert!(matches!(err, AstarError::Parse { line: 2, .. }));
    }

    #[test]
    fn ascii_map_rejects_unknown_glyph() {
        let err = TileMap::from_ascii("..x").unwrap_err();
        assert!(matches!(err, AstarError::Parse { line: 1, .. }));
    }

    #[test]
    fn property_schema() {
        let map = TileMap::from_ascii_with_property("#.", "passable").unwrap();
        assert!(map.knows_property("passable"));
        assert!(!map.knows_property("walkable"));
        assert!(!map.is_walkable(0, 0, "passable"));
        // A tileset without any properties accepts every name
        let bare = TileMap::new(2, 2, Some(0), TileSet::new());
        assert!(bare.knows_property("anything"));
    }
}
