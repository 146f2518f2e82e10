//! Grid module - the fixed square cell matrix
//!
//! The grid is a 4x4 matrix where each cell holds zero or one tile.
//! Uses a flat array for zero-allocation access.
//! Coordinates: (x, y) where x ranges 0..3 (left to right), y ranges 0..3 (top to bottom).
//! Whole-grid scans run column by column (x outer, y inner); spawn-cell selection
//! depends on that order.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::error::{CoreError, Result};
use crate::tile::Tile;
use crate::types::{Position, CELL_COUNT, GRID_SIZE};

/// The game grid, stored row-major (y * SIZE + x)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Tile>; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Build a grid from placed tiles, rejecting overlaps and unplaced tiles
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let mut grid = Self::new();
        for tile in tiles {
            grid.insert_tile(tile)?;
        }
        Ok(grid)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        let size = GRID_SIZE as i8;
        if pos.x < 0 || pos.x >= size || pos.y < 0 || pos.y >= size {
            return None;
        }
        Some((pos.y as usize) * GRID_SIZE + (pos.x as usize))
    }

    fn checked_index(pos: Position) -> Result<usize> {
        Self::index(pos).ok_or(CoreError::OutOfBounds { x: pos.x, y: pos.y })
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Every cell position in scan order (x outer, y inner)
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE as i8).flat_map(|x| (0..GRID_SIZE as i8).map(move |y| Position::new(x, y)))
    }

    pub fn within_bounds(&self, pos: Position) -> bool {
        Self::index(pos).is_some()
    }

    /// Tile at `pos`, failing loudly when `pos` is off the grid
    pub fn cell_content(&self, pos: Position) -> Result<Option<&Tile>> {
        let idx = Self::checked_index(pos)?;
        Ok(self.cells[idx].as_ref())
    }

    /// True iff `pos` is in bounds and empty
    pub fn cell_available(&self, pos: Position) -> bool {
        matches!(Self::index(pos).map(|idx| &self.cells[idx]), Some(None))
    }

    /// True iff `pos` is in bounds and holds a tile
    pub fn cell_occupied(&self, pos: Position) -> bool {
        matches!(Self::index(pos).map(|idx| &self.cells[idx]), Some(Some(_)))
    }

    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Empty cells in scan order
    pub fn available_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        Self::positions()
            .filter(|&pos| self.cell_available(pos))
            .collect()
    }

    /// Uniformly chosen empty cell
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position> {
        let cells = self.available_cells();
        if cells.is_empty() {
            return Err(CoreError::NoAvailableCell);
        }
        Ok(cells[rng.gen_range(0..cells.len())])
    }

    /// Place a tile at its own stated position
    pub fn insert_tile(&mut self, tile: Tile) -> Result<()> {
        let pos = tile.position.ok_or(CoreError::Unplaced)?;
        let idx = Self::checked_index(pos)?;
        if self.cells[idx].is_some() {
            return Err(CoreError::CellOccupied { x: pos.x, y: pos.y });
        }
        self.cells[idx] = Some(tile);
        Ok(())
    }

    /// Clear the cell `tile` claims to occupy.
    ///
    /// Fails if that cell holds nothing or holds a different tile.
    pub fn remove_tile(&mut self, tile: &Tile) -> Result<Tile> {
        let pos = tile.position.ok_or(CoreError::Unplaced)?;
        let idx = Self::checked_index(pos)?;
        match self.cells[idx] {
            Some(existing) if existing == *tile => {
                self.cells[idx] = None;
                Ok(existing)
            }
            _ => Err(CoreError::TileNotFound { x: pos.x, y: pos.y }),
        }
    }

    /// Remove and return whatever occupies `pos`
    pub fn take(&mut self, pos: Position) -> Result<Tile> {
        let idx = Self::checked_index(pos)?;
        self.cells[idx]
            .take()
            .ok_or(CoreError::TileNotFound { x: pos.x, y: pos.y })
    }

    /// Relocate the tile at `from` to the empty cell `to`
    pub fn move_tile(&mut self, from: Position, to: Position) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let to_idx = Self::checked_index(to)?;
        if self.cells[to_idx].is_some() {
            return Err(CoreError::CellOccupied { x: to.x, y: to.y });
        }
        let tile = self.take(from)?;
        self.cells[to_idx] = Some(tile.with_position(to));
        Ok(())
    }

    /// Occupied cells in scan order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        Self::positions().filter_map(move |pos| Self::index(pos).and_then(|idx| self.cells[idx].as_ref()))
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn has_heavy_tile(&self) -> bool {
        self.cells.iter().flatten().any(|tile| tile.heavy)
    }

    /// Largest value held by a number tile
    pub fn max_number_value(&self) -> Option<u64> {
        self.cells
            .iter()
            .flatten()
            .filter(|tile| tile.is_number())
            .map(|tile| tile.value)
            .max()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
