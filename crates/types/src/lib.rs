//! Core types shared across the workspace
//! This crate contains pure data types with no game logic

use serde::{Deserialize, Serialize};

/// Grid dimensions (the grid is always square)
pub const GRID_SIZE: usize = 4;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Number of random tiles placed when a fresh game starts
pub const START_TILES: usize = 2;

/// Winning values by ruleset family
pub const CLASSIC_WIN_VALUE: u64 = 2048;
pub const VARIANT_WIN_VALUE: u64 = 32768;

/// Value of the number tile produced whenever a cursor is merged into something
pub const CURSOR_MERGE_VALUE: u64 = 2048;

/// Heavy-tile mechanics
pub const HEAVY_COUNTDOWN_RESET: u32 = 10;
pub const HEAVY_SPAWN_CHANCE: f64 = 0.1;
pub const HEAVY_BASE_VALUE: u64 = 16;
pub const HEAVY_MAX_VALUE: u64 = 512;

/// Probability that a spawned number tile is a 2 (otherwise 4)
pub const SPAWN_TWO_CHANCE: f64 = 0.9;

/// Grid coordinates: x grows to the right, y grows downwards.
///
/// Signed so that a step off the edge of the grid is representable while
/// searching for the farthest free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Position one step further along `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The four directions a move can slide tiles in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector `(dx, dy)` for this direction
    pub fn vector(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Map the classic numeric encoding (0: up, 1: right, 2: down, 3: left)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "right" | "r" => Some(Direction::Right),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// What occupies a cell; `value` semantics depend on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Plain power-of-two tile
    Number,
    /// Multiplies the tile it slides into by its value
    Multiply,
    /// Replaces the tile it slides into by that tile's base-2 logarithm
    Log,
    /// Takes the `value`-th root of the tile it slides into
    Root,
    /// Navigation marker; turns whatever it hits into a 2048
    Cursor,
}

impl TileKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "number" => Some(TileKind::Number),
            "multiply" => Some(TileKind::Multiply),
            "log" => Some(TileKind::Log),
            "root" => Some(TileKind::Root),
            "cursor" => Some(TileKind::Cursor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Number => "number",
            TileKind::Multiply => "multiply",
            TileKind::Log => "log",
            TileKind::Root => "root",
            TileKind::Cursor => "cursor",
        }
    }
}

/// Named rule variants, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    Classic,
    Log,
    Sqrt,
    Heavy,
    Home,
}

impl Ruleset {
    pub const ALL: [Ruleset; 5] = [
        Ruleset::Classic,
        Ruleset::Log,
        Ruleset::Sqrt,
        Ruleset::Heavy,
        Ruleset::Home,
    ];

    /// Parse ruleset from string (case-insensitive, `original` is an alias of classic)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "original" => Some(Ruleset::Classic),
            "log" => Some(Ruleset::Log),
            "sqrt" | "root" => Some(Ruleset::Sqrt),
            "heavy" => Some(Ruleset::Heavy),
            "home" => Some(Ruleset::Home),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ruleset::Classic => "classic",
            Ruleset::Log => "log",
            Ruleset::Sqrt => "sqrt",
            Ruleset::Heavy => "heavy",
            Ruleset::Home => "home",
        }
    }

    /// Smallest number tile that wins the game
    pub fn winning_value(&self) -> u64 {
        match self {
            Ruleset::Classic | Ruleset::Heavy => CLASSIC_WIN_VALUE,
            Ruleset::Log | Ruleset::Sqrt | Ruleset::Home => VARIANT_WIN_VALUE,
        }
    }

    /// Whether a random tile is added after every successful move
    pub fn spawns_tiles(&self) -> bool {
        !matches!(self, Ruleset::Home)
    }

    /// Whether merges are checked against the winning value
    pub fn checks_win(&self) -> bool {
        !matches!(self, Ruleset::Home)
    }

    /// Whether a persisted game is resumed on startup
    pub fn restores_saved_game(&self) -> bool {
        !matches!(self, Ruleset::Home)
    }

    /// Whether the heavy-tile countdown is tracked
    pub fn tracks_heavy(&self) -> bool {
        matches!(self, Ruleset::Heavy)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::Classic
    }
}

/// Inputs the core consumes; produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    Restart,
    KeepPlaying,
}

impl GameAction {
    /// Parse action from string (for scripted input)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" => Some(GameAction::Restart),
            "keepplaying" | "continue" => Some(GameAction::KeepPlaying),
            other => Direction::from_str(other).map(GameAction::Move),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(direction) => direction.as_str(),
            GameAction::Restart => "restart",
            GameAction::KeepPlaying => "keepPlaying",
        }
    }
}
