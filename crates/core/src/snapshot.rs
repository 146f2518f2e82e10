//! Serialized game snapshot, the shape handed to persistent storage
//!
//! ```text
//! { grid: { size, cells: [x][y] of (null | TileRecord) },
//!   score, over, won, keepPlaying, heavyCountdown? }
//! ```
//!
//! Rendering hints are never part of the snapshot.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::grid::Grid;
use crate::tile::Tile;
use crate::types::{Position, TileKind, GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub grid: GridSnapshot,
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub keep_playing: bool,
    /// Present only for the heavy ruleset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heavy_countdown: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: usize,
    /// Column-major: `cells[x][y]`
    pub cells: Vec<Vec<Option<TileRecord>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    pub position: Position,
    pub kind: TileKind,
    pub value: u64,
    pub is_heavy: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub accumulated_score: u64,
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

impl TileRecord {
    pub fn to_tile(&self) -> Tile {
        Tile::new(self.kind, self.value, self.is_heavy)
            .with_position(self.position)
            .with_accumulated_score(self.accumulated_score)
    }
}

impl GridSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        let size = grid.size();
        let mut cells = vec![vec![None; size]; size];
        for tile in grid.tiles() {
            if let Some(pos) = tile.position {
                cells[pos.x as usize][pos.y as usize] = Some(TileRecord {
                    position: pos,
                    kind: tile.kind,
                    value: tile.value,
                    is_heavy: tile.heavy,
                    accumulated_score: tile.accumulated_score,
                });
            }
        }
        Self { size, cells }
    }

    /// Rebuild a grid, rejecting snapshots whose shape or positions disagree
    pub fn to_grid(&self) -> Result<Grid> {
        if self.size != GRID_SIZE || self.cells.len() != GRID_SIZE {
            return Err(CoreError::InvalidSnapshot(format!(
                "expected a {GRID_SIZE}x{GRID_SIZE} grid, got size {} with {} columns",
                self.size,
                self.cells.len()
            )));
        }

        let mut grid = Grid::new();
        for (x, column) in self.cells.iter().enumerate() {
            if column.len() != GRID_SIZE {
                return Err(CoreError::InvalidSnapshot(format!(
                    "column {x} has {} cells",
                    column.len()
                )));
            }
            for (y, record) in column.iter().enumerate() {
                let Some(record) = record else { continue };
                let expected = Position::new(x as i8, y as i8);
                if record.position != expected {
                    return Err(CoreError::InvalidSnapshot(format!(
                        "tile stored at ({x}, {y}) claims position ({}, {})",
                        record.position.x, record.position.y
                    )));
                }
                grid.insert_tile(record.to_tile())?;
            }
        }
        Ok(grid)
    }
}
