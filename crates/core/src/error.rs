//! Error types raised by the core.
//!
//! Every variant is an internal-invariant violation: correct traversal and
//! spawn logic never produces them, but they are reported instead of being
//! silently tolerated.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i8, y: i8 },

    #[error("cell ({x}, {y}) is already occupied")]
    CellOccupied { x: i8, y: i8 },

    #[error("no tile at ({x}, {y})")]
    TileNotFound { x: i8, y: i8 },

    #[error("tile has not been placed on the grid")]
    Unplaced,

    #[error("no available cell to place a tile")]
    NoAvailableCell,

    #[error("tile at ({x}, {y}) was already produced by a merge this move")]
    InvalidMergeRequest { x: i8, y: i8 },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
