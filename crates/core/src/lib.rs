//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the sliding-tile game family: the grid,
//! tiles, the merge table, single-move resolution and whole-game state.
//! It has **no dependencies** on rendering, storage, or terminal I/O, making it:
//!
//! - **Deterministic**: the same seed replays an identical game
//! - **Testable**: every rule is a plain function over plain data
//! - **Portable**: runs headless, in the terminal front end, or in benches
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 cell matrix with bounds-checked placement
//! - [`tile`]: one occupant of a cell (number, multiply, log, root, cursor)
//! - [`merge`]: what two colliding tiles turn into, and what it scores
//! - [`movement`]: resolves one directional slide, including tie-breaks
//! - [`game_state`]: score, win/over lifecycle, spawning and heavy countdown
//! - [`rng`]: spawn tables driven by a single injected generator
//! - [`snapshot`]: the serialized game handed to storage
//! - [`event`]: observational records for telemetry
//!
//! # Rulesets
//!
//! - **classic**: numbers only, win at 2048
//! - **log** / **sqrt**: operator tiles spawn alongside numbers, win at 32768
//! - **heavy**: immovable heavy tiles spawn once a countdown runs out
//! - **home**: a fixed menu board; merging the cursor picks a ruleset
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::GameState;
//! use tui_tiles_types::{Direction, Ruleset};
//!
//! let mut game = GameState::new(Ruleset::Classic, 12345);
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! for direction in [Direction::Left, Direction::Up, Direction::Right] {
//!     game.move_in(direction).unwrap();
//! }
//! assert!(game.grid().tile_count() >= 2);
//! ```

pub mod error;
pub mod event;
pub mod game_state;
pub mod grid;
pub mod merge;
pub mod movement;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use tui_tiles_types as types;

// Re-export commonly used types for convenience
pub use error::{CoreError, Result};
pub use event::GameEvent;
pub use game_state::{home_layout, navigation_target, GameState, MoveOutcome};
pub use grid::Grid;
pub use merge::{can_merge, merge_rule, result_of_merging, MergeRule};
pub use movement::{slide, MotionHints, Slide};
pub use rng::{seeded, GameRng};
pub use snapshot::{GameSnapshot, GridSnapshot, TileRecord};
pub use tile::Tile;
