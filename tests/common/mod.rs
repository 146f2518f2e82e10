//! Shared helpers for the integration tests.
#![allow(dead_code)]

use rand::{Error, RngCore};
use tui_tiles::core::{Grid, Tile};
use tui_tiles::types::GRID_SIZE;

/// Word that makes every `gen_bool(p)` with `p > 0` succeed; as a cell draw
/// it picks the first available cell.
pub const YES: u64 = 0;
/// Word that makes every `gen_bool(p)` with `p < 1` fail.
pub const NO: u64 = u64::MAX;

/// Generator replaying a fixed list of words, then zeros forever.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    words: Vec<u64>,
    pub drawn: usize,
}

impl Scripted {
    pub fn new(words: &[u64]) -> Self {
        Self {
            words: words.to_vec(),
            drawn: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

impl RngCore for Scripted {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.drawn += 1;
        if self.words.is_empty() {
            0
        } else {
            self.words.remove(0)
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Build a grid of light number tiles from rows (`rows[y][x]`, 0 = empty)
pub fn number_grid(rows: [[u64; GRID_SIZE]; GRID_SIZE]) -> Grid {
    let mut tiles = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value != 0 {
                tiles.push(Tile::number(x as i8, y as i8, value));
            }
        }
    }
    Grid::from_tiles(tiles).unwrap()
}

/// Number values by row (`[y][x]`); empty cells and non-number tiles read as 0
pub fn number_rows(grid: &Grid) -> [[u64; GRID_SIZE]; GRID_SIZE] {
    let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
    for tile in grid.tiles() {
        if let (Some(pos), true) = (tile.position, tile.is_number()) {
            rows[pos.y as usize][pos.x as usize] = tile.value;
        }
    }
    rows
}
