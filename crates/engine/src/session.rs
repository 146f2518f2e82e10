//! Session - one ruleset's game wired to its storage, renderer and telemetry
//!
//! The session owns the [`GameState`] and is the only place collaborators are
//! called. Collaborator failures are logged and never reach the game.

use rand::Rng;
use tui_tiles_core::{GameRng, GameState, Grid, MotionHints, MoveOutcome};
use tui_tiles_types::{Direction, GameAction, Ruleset};

use crate::actuator::{Actuator, ActuatorMetadata};
use crate::storage::Storage;
use crate::telemetry::{Telemetry, TelemetryRecord};

pub struct Session<S, A, T, R = GameRng> {
    game: GameState<R>,
    storage: S,
    actuator: A,
    telemetry: T,
    /// Last best score seen; used when storage cannot be read
    best_score: u64,
}

impl<S, A, T, R> Session<S, A, T, R>
where
    S: Storage,
    A: Actuator,
    T: Telemetry,
    R: Rng,
{
    /// Build the session and run setup: resume the stored game when the
    /// ruleset allows it, otherwise start a new one.
    pub fn new(ruleset: Ruleset, rng: R, storage: S, actuator: A, telemetry: T) -> Self {
        let mut session = Self {
            game: GameState::from_grid(ruleset, Grid::new(), rng),
            storage,
            actuator,
            telemetry,
            best_score: 0,
        };
        session.setup();
        session
    }

    fn setup(&mut self) {
        let restored = self.ruleset().restores_saved_game() && self.try_restore();
        if !restored {
            self.game.reset();
        }
        self.flush_events();
        self.actuate(None);
    }

    fn try_restore(&mut self) -> bool {
        match self.storage.game_state() {
            Ok(Some(snapshot)) => match self.game.load_snapshot(&snapshot) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(%err, "discarding stored game");
                    false
                }
            },
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(%err, "failed to read stored game");
                false
            }
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        self.game.ruleset()
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Hand the collaborators back, e.g. to reuse them for another ruleset
    pub fn into_parts(self) -> (S, A, T) {
        (self.storage, self.actuator, self.telemetry)
    }

    /// Dispatch an input action. Returns the ruleset to navigate to, if a
    /// home-screen move selected one.
    pub fn handle(&mut self, action: GameAction) -> tui_tiles_core::Result<Option<Ruleset>> {
        match action {
            GameAction::Move(direction) => Ok(self.move_in(direction)?.navigation),
            GameAction::Restart => {
                self.restart();
                Ok(None)
            }
            GameAction::KeepPlaying => {
                self.keep_playing();
                Ok(None)
            }
        }
    }

    /// Apply a move; collaborators are only notified when something moved
    pub fn move_in(&mut self, direction: Direction) -> tui_tiles_core::Result<MoveOutcome> {
        let outcome = self.game.move_in(direction)?;
        if outcome.moved {
            self.flush_events();
            self.actuate(Some(&outcome.hints));
        }
        if let Some(target) = outcome.navigation {
            tracing::info!(target = target.as_str(), "navigation selected");
        }
        Ok(outcome)
    }

    pub fn restart(&mut self) {
        if let Err(err) = self.storage.clear_game_state() {
            tracing::warn!(%err, "failed to clear stored game");
        }
        self.actuator.continue_game();
        self.setup();
    }

    pub fn keep_playing(&mut self) {
        self.game.continue_playing();
        self.actuator.continue_game();
    }

    /// Draw the current state again without touching storage
    pub fn redraw(&mut self) {
        let metadata = self.metadata();
        self.actuator.actuate(self.game.grid(), &metadata, None);
    }

    fn actuate(&mut self, hints: Option<&MotionHints>) {
        let stored = self.storage.best_score().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to read best score");
            self.best_score
        });
        self.best_score = stored.max(self.best_score);

        let score = self.game.score();
        if stored < score {
            self.best_score = score;
            if let Err(err) = self.storage.set_best_score(score) {
                tracing::warn!(%err, "failed to store best score");
            }
        }

        let saved = if self.game.over() {
            self.storage.clear_game_state()
        } else {
            self.storage.set_game_state(&self.game.snapshot())
        };
        if let Err(err) = saved {
            tracing::warn!(%err, "failed to persist game");
        }

        let metadata = self.metadata();
        self.actuator.actuate(self.game.grid(), &metadata, hints);
    }

    fn metadata(&self) -> ActuatorMetadata {
        ActuatorMetadata {
            ruleset: self.ruleset(),
            score: self.game.score(),
            best_score: self.best_score,
            over: self.game.over(),
            won: self.game.won(),
            terminated: self.game.is_game_terminated(),
            heavy_countdown: self
                .ruleset()
                .tracks_heavy()
                .then_some(self.game.heavy_countdown()),
        }
    }

    fn flush_events(&mut self) {
        let ruleset = self.ruleset();
        for event in self.game.take_events() {
            self.telemetry.record(&TelemetryRecord {
                ruleset,
                best_score: self.best_score,
                event: &event,
            });
        }
    }
}
