//! Game state module - one game of a ruleset, from first spawn to game over
//!
//! Owns the grid, score, lifecycle flags, heavy countdown and the injected
//! random generator. Every mutation goes through [`GameState::move_in`],
//! [`GameState::continue_playing`] or [`GameState::reset`]; rendering and
//! persistence are left to the caller.

use rand::Rng;

use crate::error::Result;
use crate::event::GameEvent;
use crate::grid::Grid;
use crate::merge::can_merge;
use crate::movement::{self, MotionHints};
use crate::rng::{self, GameRng};
use crate::snapshot::{GameSnapshot, GridSnapshot};
use crate::tile::Tile;
use crate::types::{Direction, Ruleset, TileKind, HEAVY_COUNTDOWN_RESET, START_TILES};

/// Fixed opening layout of the home screen
pub fn home_layout() -> [Tile; 5] {
    [
        Tile::at(1, 1, TileKind::Cursor, 0, false),
        Tile::at(2, 3, TileKind::Root, 2, false),
        Tile::at(3, 3, TileKind::Log, 0, false),
        Tile::at(3, 1, TileKind::Number, 512, true),
        Tile::number(1, 2, 2),
    ]
}

/// Ruleset a home-screen cursor merge navigates to, keyed on the tile it hit
pub fn navigation_target(into: &Tile) -> Ruleset {
    match into.kind {
        TileKind::Log => Ruleset::Log,
        TileKind::Root => Ruleset::Sqrt,
        _ if into.heavy => Ruleset::Heavy,
        _ => Ruleset::Classic,
    }
}

/// What a single call to [`GameState::move_in`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// False for a no-op: nothing changed, nothing was spawned
    pub moved: bool,
    pub score_delta: i64,
    pub spawned: Option<Tile>,
    /// The game became won during this move
    pub won: bool,
    /// The game became over during this move
    pub over: bool,
    /// Set when a home-screen cursor merge selects a ruleset
    pub navigation: Option<Ruleset>,
    pub hints: MotionHints,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = GameRng> {
    ruleset: Ruleset,
    grid: Grid,
    score: u64,
    over: bool,
    won: bool,
    keep_playing: bool,
    /// Moves left before a heavy tile may spawn (heavy ruleset only)
    heavy_countdown: u32,
    rng: R,
    /// Events of the latest operation; replaced by the next one
    events: Vec<GameEvent>,
}

impl GameState<GameRng> {
    /// Start a fresh game with a seeded generator
    pub fn new(ruleset: Ruleset, seed: u64) -> Self {
        Self::with_rng(ruleset, rng::seeded(seed))
    }
}

impl<R: Rng> GameState<R> {
    fn blank(ruleset: Ruleset, grid: Grid, rng: R) -> Self {
        Self {
            ruleset,
            grid,
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
            heavy_countdown: if ruleset.tracks_heavy() {
                HEAVY_COUNTDOWN_RESET
            } else {
                0
            },
            rng,
            events: Vec::new(),
        }
    }

    /// Start a fresh game: the home layout, or two random start tiles
    pub fn with_rng(ruleset: Ruleset, rng: R) -> Self {
        let mut state = Self::blank(ruleset, Grid::new(), rng);
        state.setup_fresh();
        state
    }

    /// Wrap an existing grid without adding start tiles
    pub fn from_grid(ruleset: Ruleset, grid: Grid, rng: R) -> Self {
        Self::blank(ruleset, grid, rng)
    }

    /// Resume a previously serialized game
    pub fn restore(ruleset: Ruleset, snapshot: &GameSnapshot, rng: R) -> Result<Self> {
        let mut state = Self::blank(ruleset, Grid::new(), rng);
        state.load_snapshot(snapshot)?;
        Ok(state)
    }

    /// Replace the current game by a serialized one.
    ///
    /// The snapshot is validated first; on error the state is left untouched.
    pub fn load_snapshot(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.grid = snapshot.grid.to_grid()?;
        self.events.clear();
        self.score = snapshot.score;
        self.over = snapshot.over;
        self.won = snapshot.won;
        self.keep_playing = snapshot.keep_playing;
        self.heavy_countdown = if self.ruleset.tracks_heavy() {
            snapshot.heavy_countdown.unwrap_or(HEAVY_COUNTDOWN_RESET)
        } else {
            0
        };
        self.events.push(GameEvent::Restored {
            ruleset: self.ruleset,
            score: self.score,
        });
        tracing::info!(ruleset = self.ruleset.as_str(), score = self.score, "game restored");
        Ok(())
    }

    /// Throw the current game away and start over with the same generator
    pub fn reset(&mut self) {
        tracing::info!(ruleset = self.ruleset.as_str(), "new game");
        self.events.clear();
        self.grid.clear();
        self.score = 0;
        self.over = false;
        self.won = false;
        self.keep_playing = false;
        self.heavy_countdown = if self.ruleset.tracks_heavy() {
            HEAVY_COUNTDOWN_RESET
        } else {
            0
        };
        self.setup_fresh();
    }

    fn setup_fresh(&mut self) {
        self.events.push(GameEvent::NewGame {
            ruleset: self.ruleset,
        });
        if self.ruleset == Ruleset::Home {
            for tile in home_layout() {
                // The layout is fixed and non-overlapping.
                if let Err(err) = self.grid.insert_tile(tile) {
                    tracing::error!(%err, "home layout rejected");
                }
            }
            return;
        }
        for _ in 0..START_TILES {
            if let Err(err) = self.add_random_tile(true) {
                tracing::error!(%err, "failed to place start tile");
            }
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    pub fn heavy_countdown(&self) -> u32 {
        self.heavy_countdown
    }

    /// Over, or won without having chosen to keep playing
    pub fn is_game_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Let a won game continue; the won flag stays set
    pub fn continue_playing(&mut self) {
        self.keep_playing = true;
    }

    /// Drain the events of the latest operation.
    ///
    /// Each move, reset or restore starts a fresh queue, so a caller that
    /// never drains holds at most one operation's worth of events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn one random tile into a random empty cell.
    ///
    /// Returns `Ok(None)` without touching the generator when the grid is full.
    pub fn add_random_tile(&mut self, initial: bool) -> Result<Option<Tile>> {
        if !self.grid.cells_available() {
            return Ok(None);
        }

        let kind = rng::spawn_kind(self.ruleset, initial, &mut self.rng);
        let mut value = rng::spawn_value(kind, &mut self.rng);
        let mut heavy = false;
        if self.ruleset.tracks_heavy()
            && self.heavy_countdown == 0
            && rng::heavy_triggered(&mut self.rng)
        {
            value = rng::heavy_value(&mut self.rng);
            heavy = true;
        }

        let position = self.grid.random_available_cell(&mut self.rng)?;
        let tile = Tile::new(kind, value, heavy).with_position(position);
        self.grid.insert_tile(tile)?;
        self.events.push(GameEvent::tile_added(&tile, position));
        tracing::trace!(
            kind = kind.as_str(),
            value,
            heavy,
            x = position.x,
            y = position.y,
            "tile added"
        );
        Ok(Some(tile))
    }

    /// Slide the grid in `direction`.
    ///
    /// A terminated game or a slide that changes nothing is a no-op: no score,
    /// no spawn, no countdown change and no generator draws.
    pub fn move_in(&mut self, direction: Direction) -> Result<MoveOutcome> {
        self.events.clear();
        if self.is_game_terminated() {
            return Ok(MoveOutcome::default());
        }

        let slide = movement::slide(&mut self.grid, direction, &mut self.rng)?;
        if !slide.moved {
            return Ok(MoveOutcome::default());
        }

        let mut outcome = MoveOutcome {
            moved: true,
            score_delta: slide.score_delta,
            ..MoveOutcome::default()
        };

        for merge in &slide.hints.merges {
            self.score = self.score.saturating_add_signed(merge.result.score);
            self.events.push(GameEvent::TileMerged {
                kind: merge.result.kind,
                value: merge.result.value,
                position: merge.at,
                score: self.score,
                score_delta: merge.result.score,
            });

            if self.ruleset.checks_win()
                && !self.won
                && merge.result.is_number()
                && merge.result.value >= self.ruleset.winning_value()
            {
                self.won = true;
                outcome.won = true;
                self.events.push(GameEvent::Won { score: self.score });
                tracing::info!(score = self.score, ruleset = self.ruleset.as_str(), "game won");
            }

            if self.ruleset == Ruleset::Home && merge.slid.kind == TileKind::Cursor {
                outcome.navigation = Some(navigation_target(&merge.into));
            }
        }

        if self.ruleset.tracks_heavy() {
            if self.grid.has_heavy_tile() {
                self.heavy_countdown = HEAVY_COUNTDOWN_RESET;
            } else {
                self.heavy_countdown = self.heavy_countdown.saturating_sub(1);
            }
        }

        if self.ruleset.spawns_tiles() {
            outcome.spawned = self.add_random_tile(false)?;
        }

        if !self.moves_available() {
            self.over = true;
            outcome.over = true;
            self.events.push(GameEvent::GameOver { score: self.score });
            tracing::info!(score = self.score, ruleset = self.ruleset.as_str(), "game over");
        }

        tracing::debug!(
            direction = direction.as_str(),
            score_delta = slide.score_delta,
            merges = slide.hints.merges.len(),
            score = self.score,
            "move applied"
        );

        outcome.hints = slide.hints;
        Ok(outcome)
    }

    /// An empty cell exists or some pair of neighbours could merge
    pub fn moves_available(&self) -> bool {
        self.grid.cells_available() || self.tile_matches_available()
    }

    /// Whether any movable tile could merge into an orthogonal neighbour
    pub fn tile_matches_available(&self) -> bool {
        Grid::positions().any(|pos| {
            let Some(tile) = self.grid.cell_content(pos).ok().flatten() else {
                return false;
            };
            if tile.heavy {
                return false;
            }
            Direction::ALL.iter().any(|&direction| {
                self.grid
                    .cell_content(pos.step(direction))
                    .ok()
                    .flatten()
                    .is_some_and(|other| can_merge(tile, other))
            })
        })
    }

    /// Serializable form of the current game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: GridSnapshot::from_grid(&self.grid),
            score: self.score,
            over: self.over,
            won: self.won,
            keep_playing: self.keep_playing,
            heavy_countdown: self.ruleset.tracks_heavy().then_some(self.heavy_countdown),
        }
    }
}
