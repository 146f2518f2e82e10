//! Session tests against real collaborators: JSON files on disk and a
//! JSON-lines telemetry sink.

mod common;

use common::{number_grid, Scripted, YES};
use tui_tiles::core::{seeded, GameState, Grid, GridSnapshot, MotionHints};
use tui_tiles::engine::{
    Actuator, ActuatorMetadata, JsonFileStorage, JsonLinesTelemetry, MemoryStorage, NoTelemetry,
    Session, Storage,
};
use tui_tiles::types::{Direction, GameAction, Ruleset};

#[derive(Default)]
struct Screen {
    frames: Vec<ActuatorMetadata>,
}

impl Actuator for Screen {
    fn actuate(&mut self, _grid: &Grid, metadata: &ActuatorMetadata, _hints: Option<&MotionHints>) {
        self.frames.push(*metadata);
    }

    fn continue_game(&mut self) {}
}

fn play(session: &mut Session<JsonFileStorage, Screen, NoTelemetry>, moves: usize) {
    for direction in Direction::ALL.iter().cycle().take(moves) {
        session.move_in(*direction).unwrap();
    }
}

#[test]
fn test_game_resumes_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path(), Ruleset::Sqrt).unwrap();
    let mut first = Session::new(Ruleset::Sqrt, seeded(1), storage, Screen::default(), NoTelemetry);
    play(&mut first, 12);
    let left = first.game().snapshot();
    drop(first);

    let storage = JsonFileStorage::new(dir.path(), Ruleset::Sqrt).unwrap();
    let second = Session::new(Ruleset::Sqrt, seeded(99), storage, Screen::default(), NoTelemetry);
    assert_eq!(second.game().snapshot(), left);
    assert!(dir.path().join("sqrt-state.json").exists());
}

#[test]
fn test_rulesets_do_not_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path(), Ruleset::Classic).unwrap();
    let mut classic = Session::new(Ruleset::Classic, seeded(4), storage, Screen::default(), NoTelemetry);
    play(&mut classic, 30);
    assert!(classic.best_score() > 0);

    let heavy_storage = JsonFileStorage::new(dir.path(), Ruleset::Heavy).unwrap();
    assert_eq!(heavy_storage.best_score().unwrap(), 0);
    assert!(heavy_storage.game_state().unwrap().is_none());
}

#[test]
fn test_corrupted_state_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("classic-state.json"), b"{ not json").unwrap();

    let storage = JsonFileStorage::new(dir.path(), Ruleset::Classic).unwrap();
    let session = Session::new(Ruleset::Classic, seeded(2), storage, Screen::default(), NoTelemetry);
    assert_eq!(session.game().grid().tile_count(), 2);
    assert_eq!(session.game().score(), 0);
    // The fresh game replaced the unreadable file.
    assert!(session.storage().game_state().unwrap().is_some());
}

#[test]
fn test_best_score_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path(), Ruleset::Classic).unwrap();
    let mut session = Session::new(Ruleset::Classic, seeded(8), storage, Screen::default(), NoTelemetry);
    play(&mut session, 40);
    let best = session.best_score();
    assert!(best > 0);

    session.handle(GameAction::Restart).unwrap();
    assert_eq!(session.game().score(), 0);
    assert_eq!(session.best_score(), best);
    let last = session.actuator().frames.last().copied().unwrap();
    assert_eq!((last.score, last.best_score), (0, best));
}

#[test]
fn test_game_over_clears_stored_game() {
    let mut snapshot = GameState::new(Ruleset::Classic, 1).snapshot();
    snapshot.grid = GridSnapshot::from_grid(&number_grid([
        [0, 8, 16, 8],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
    ]));
    let mut session = Session::new(
        Ruleset::Classic,
        Scripted::new(&[YES, YES]),
        MemoryStorage::with_game_state(snapshot),
        Screen::default(),
        NoTelemetry,
    );

    session.move_in(Direction::Left).unwrap();
    let last = session.actuator().frames.last().copied().unwrap();
    assert!(last.over && last.terminated);
    assert!(session.storage().game_state().unwrap().is_none());
}

#[test]
fn test_noop_move_is_not_drawn() {
    let mut snapshot = GameState::new(Ruleset::Classic, 1).snapshot();
    snapshot.grid = GridSnapshot::from_grid(&number_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));
    let mut session = Session::new(
        Ruleset::Classic,
        seeded(1),
        MemoryStorage::with_game_state(snapshot),
        Screen::default(),
        NoTelemetry,
    );

    let outcome = session.move_in(Direction::Up).unwrap();
    assert!(!outcome.moved);
    assert_eq!(session.actuator().frames.len(), 1);
}

#[test]
fn test_telemetry_lines_are_json() {
    let mut session = Session::new(
        Ruleset::Log,
        seeded(6),
        MemoryStorage::new(),
        Screen::default(),
        JsonLinesTelemetry::new(Vec::new()),
    );
    for direction in Direction::ALL.iter().cycle().take(8) {
        session.move_in(*direction).unwrap();
    }

    let (_, _, telemetry) = session.into_parts();
    let out = String::from_utf8(telemetry.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines[0]["event"], "newGame");
    assert_eq!(lines[1]["event"], "tileAdded");
    assert!(lines.iter().all(|l| l["ruleset"] == "log"));
}

#[test]
fn test_home_cursor_navigates() {
    let mut session = Session::new(
        Ruleset::Home,
        seeded(0),
        MemoryStorage::new(),
        Screen::default(),
        NoTelemetry,
    );
    // The cursor at (1, 1) runs right into the heavy 512 at (3, 1).
    let target = session.handle(GameAction::Move(Direction::Right)).unwrap();
    assert_eq!(target, Some(Ruleset::Heavy));
}
