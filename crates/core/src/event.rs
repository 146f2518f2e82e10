//! Gameplay events, queued by the game state and drained by observers

use serde::Serialize;

use crate::tile::Tile;
use crate::types::{Position, Ruleset, TileKind};

/// Descriptive record of something that happened in a game.
///
/// Purely observational: nothing in the core reads these back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    NewGame {
        ruleset: Ruleset,
    },
    Restored {
        ruleset: Ruleset,
        score: u64,
    },
    TileAdded {
        kind: TileKind,
        value: u64,
        is_heavy: bool,
        position: Position,
    },
    TileMerged {
        kind: TileKind,
        value: u64,
        position: Position,
        score: u64,
        score_delta: i64,
    },
    Won {
        score: u64,
    },
    GameOver {
        score: u64,
    },
}

impl GameEvent {
    pub(crate) fn tile_added(tile: &Tile, position: Position) -> Self {
        GameEvent::TileAdded {
            kind: tile.kind,
            value: tile.value,
            is_heavy: tile.heavy,
            position,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::NewGame { .. } => "newGame",
            GameEvent::Restored { .. } => "restored",
            GameEvent::TileAdded { .. } => "tileAdded",
            GameEvent::TileMerged { .. } => "tileMerged",
            GameEvent::Won { .. } => "won",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}
