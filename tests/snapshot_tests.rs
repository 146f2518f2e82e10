//! Persisted snapshot tests: what a stored game looks like and how it
//! comes back.

use serde_json::json;
use tui_tiles::core::{GameSnapshot, GameState};
use tui_tiles::types::{Direction, Position, Ruleset, TileKind};

fn played(ruleset: Ruleset, seed: u64, moves: usize) -> GameState {
    let mut game = GameState::new(ruleset, seed);
    for direction in Direction::ALL.iter().cycle().take(moves) {
        game.move_in(*direction).unwrap();
    }
    game
}

#[test]
fn test_json_roundtrip_resumes_same_game() {
    let game = played(Ruleset::Log, 5, 40);
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();

    let restored = GameState::restore(Ruleset::Log, &snapshot, tui_tiles::core::seeded(0)).unwrap();
    assert_eq!(restored.grid(), game.grid());
    assert_eq!(restored.score(), game.score());
    assert_eq!(restored.over(), game.over());
}

#[test]
fn test_heavy_snapshot_carries_countdown() {
    let game = played(Ruleset::Heavy, 9, 3);
    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["heavyCountdown"], json!(game.heavy_countdown()));

    let classic = played(Ruleset::Classic, 9, 3);
    let value = serde_json::to_value(classic.snapshot()).unwrap();
    assert!(value.get("heavyCountdown").is_none());
}

#[test]
fn test_hand_written_snapshot_loads() {
    let mut cells = vec![vec![serde_json::Value::Null; 4]; 4];
    cells[2][1] = json!({
        "position": { "x": 2, "y": 1 },
        "kind": "number",
        "value": 64,
        "isHeavy": true
    });
    cells[0][3] = json!({
        "position": { "x": 0, "y": 3 },
        "kind": "multiply",
        "value": 4,
        "isHeavy": false,
        "accumulatedScore": 12
    });
    let raw = json!({
        "grid": { "size": 4, "cells": cells },
        "score": 300,
        "over": false,
        "won": false,
        "keepPlaying": false
    });

    let snapshot: GameSnapshot = serde_json::from_value(raw).unwrap();
    let game = GameState::restore(Ruleset::Heavy, &snapshot, tui_tiles::core::seeded(0)).unwrap();

    let heavy = game.grid().cell_content(Position::new(2, 1)).unwrap().unwrap();
    assert!(heavy.heavy && heavy.value == 64);
    let multiply = game.grid().cell_content(Position::new(0, 3)).unwrap().unwrap();
    assert_eq!(multiply.kind, TileKind::Multiply);
    assert_eq!(multiply.accumulated_score, 12);
    assert_eq!(game.score(), 300);
    // Missing countdown falls back to the reset value.
    assert_eq!(game.heavy_countdown(), tui_tiles::types::HEAVY_COUNTDOWN_RESET);
}

#[test]
fn test_wrong_size_is_rejected() {
    let raw = json!({
        "grid": { "size": 5, "cells": vec![vec![serde_json::Value::Null; 5]; 5] },
        "score": 0,
        "over": false,
        "won": false,
        "keepPlaying": false
    });
    let snapshot: GameSnapshot = serde_json::from_value(raw).unwrap();
    assert!(GameState::restore(Ruleset::Classic, &snapshot, tui_tiles::core::seeded(0)).is_err());
}
