//! Tile module - one occupant of a grid cell

use crate::types::{Position, TileKind};

/// A single board occupant.
///
/// Tiles are small `Copy` values; a merge never mutates its sources but
/// synthesizes a fresh tile that has no position until the engine places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub position: Option<Position>,
    pub kind: TileKind,
    pub value: u64,
    pub heavy: bool,
    /// Points this tile is worth when it is the result of a merge.
    /// Negative for inverse operations that refund accumulated score.
    pub score: i64,
    /// Total points invested in building the current value.
    pub accumulated_score: u64,
}

impl Tile {
    /// Create an unplaced tile. Its score defaults to its value.
    pub fn new(kind: TileKind, value: u64, heavy: bool) -> Self {
        Self {
            position: None,
            kind,
            value,
            heavy,
            score: value as i64,
            accumulated_score: 0,
        }
    }

    /// Create a tile already placed at `(x, y)`
    pub fn at(x: i8, y: i8, kind: TileKind, value: u64, heavy: bool) -> Self {
        Self::new(kind, value, heavy).with_position(Position::new(x, y))
    }

    /// Plain light number tile at `(x, y)`
    pub fn number(x: i8, y: i8, value: u64) -> Self {
        Self::at(x, y, TileKind::Number, value, false)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_accumulated_score(mut self, accumulated_score: u64) -> Self {
        self.accumulated_score = accumulated_score;
        self
    }

    pub fn is_number(&self) -> bool {
        self.kind == TileKind::Number
    }
}
