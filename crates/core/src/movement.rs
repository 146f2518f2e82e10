//! Movement module - resolves one directional slide across the grid
//!
//! Cells are visited farthest-from-destination first: both axes run 0..N,
//! reversed on the axis whose vector component is +1. Every tile is therefore
//! resolved before the tile that would run into it, which fixes the tie-breaks
//! (which of several possible merges happens) exactly.
//!
//! A cell that received a merge result is marked for the rest of the slide and
//! can never be a merge target again.

use rand::Rng;

use crate::error::{CoreError, Result};
use crate::grid::Grid;
use crate::merge::result_of_merging;
use crate::tile::Tile;
use crate::types::{Direction, Position, CELL_COUNT, GRID_SIZE};

/// Visit order for a slide in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversals {
    pub xs: [i8; GRID_SIZE],
    pub ys: [i8; GRID_SIZE],
}

impl Traversals {
    pub fn new(direction: Direction) -> Self {
        let mut xs = [0i8; GRID_SIZE];
        let mut ys = [0i8; GRID_SIZE];
        for i in 0..GRID_SIZE {
            xs[i] = i as i8;
            ys[i] = i as i8;
        }

        let (dx, dy) = direction.vector();
        if dx == 1 {
            xs.reverse();
        }
        if dy == 1 {
            ys.reverse();
        }
        Self { xs, ys }
    }

    /// Cells in visit order (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.xs
            .iter()
            .flat_map(move |&x| self.ys.iter().map(move |&y| Position::new(x, y)))
    }
}

/// Result of walking from a cell towards the grid edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell reachable (or the start cell itself)
    pub farthest: Position,
    /// First cell past `farthest`: an occupied cell or off the grid
    pub next: Position,
}

/// Walk from `cell` along `direction` until leaving the grid or hitting a tile
pub fn find_farthest_position(grid: &Grid, cell: Position, direction: Direction) -> FarthestPosition {
    let mut previous = cell;
    let mut next = cell.step(direction);
    while grid.cell_available(next) {
        previous = next;
        next = next.step(direction);
    }
    FarthestPosition {
        farthest: previous,
        next,
    }
}

/// A tile that slid from one cell to another without merging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMotion {
    pub from: Position,
    pub to: Position,
}

/// A merge that happened during a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    /// Cell the result landed in (the stationary tile's cell)
    pub at: Position,
    /// The sliding tile, at its position before the move
    pub slid: Tile,
    /// The stationary tile it ran into
    pub into: Tile,
    /// The placed result
    pub result: Tile,
}

/// Transient rendering hints for one move; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionHints {
    pub moves: Vec<TileMotion>,
    pub merges: Vec<Merge>,
}

impl MotionHints {
    /// Where the tile now at `pos` was before the move, if it moved
    pub fn previous_position(&self, pos: Position) -> Option<Position> {
        self.moves.iter().find(|m| m.to == pos).map(|m| m.from)
    }

    /// The two tiles consumed to produce the tile now at `pos`
    pub fn merged_from(&self, pos: Position) -> Option<[Tile; 2]> {
        self.merges
            .iter()
            .find(|m| m.at == pos)
            .map(|m| [m.slid, m.into])
    }
}

/// Outcome of sliding the grid once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    /// Whether any tile ended up somewhere other than where it started
    pub moved: bool,
    pub score_delta: i64,
    pub hints: MotionHints,
}

/// Cells that already hold a merge result this slide
#[derive(Debug, Clone)]
struct MergeMarks([bool; CELL_COUNT]);

impl MergeMarks {
    fn new() -> Self {
        Self([false; CELL_COUNT])
    }

    fn slot(pos: Position) -> usize {
        (pos.y as usize) * GRID_SIZE + (pos.x as usize)
    }

    fn is_marked(&self, pos: Position) -> bool {
        self.0[Self::slot(pos)]
    }

    fn mark(&mut self, pos: Position) -> Result<()> {
        let slot = &mut self.0[Self::slot(pos)];
        if *slot {
            return Err(CoreError::InvalidMergeRequest { x: pos.x, y: pos.y });
        }
        *slot = true;
        Ok(())
    }
}

/// Slide every movable tile in `direction`, merging where the rules allow.
///
/// Heavy tiles never slide but can be merged into.
pub fn slide<R: Rng + ?Sized>(grid: &mut Grid, direction: Direction, rng: &mut R) -> Result<Slide> {
    let traversals = Traversals::new(direction);
    let mut marks = MergeMarks::new();
    let mut out = Slide::default();

    for cell in traversals.cells() {
        let tile = match grid.cell_content(cell)? {
            Some(tile) if !tile.heavy => *tile,
            _ => continue,
        };

        let FarthestPosition { farthest, next } = find_farthest_position(grid, cell, direction);

        // Only one merge per destination cell per slide.
        let target = if grid.within_bounds(next) && !marks.is_marked(next) {
            grid.cell_content(next)?.copied()
        } else {
            None
        };
        let merged = target.and_then(|into| result_of_merging(&tile, &into, rng).map(|m| (into, m)));

        if let Some((into, merged)) = merged {
            marks.mark(next)?;
            grid.remove_tile(&into)?;
            grid.remove_tile(&tile)?;
            let result = merged.with_position(next);
            grid.insert_tile(result)?;

            out.score_delta += result.score;
            out.hints.merges.push(Merge {
                at: next,
                slid: tile,
                into,
                result,
            });
            out.moved = true;
        } else if farthest != cell {
            grid.move_tile(cell, farthest)?;
            out.hints.moves.push(TileMotion {
                from: cell,
                to: farthest,
            });
            out.moved = true;
        }
    }

    Ok(out)
}
