//! Renderer contract: receives the committed grid after setup and every
//! successful move. Never feeds anything back into the game.

use tui_tiles_core::{Grid, MotionHints};
use tui_tiles_types::Ruleset;

/// Everything a renderer needs besides the grid itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorMetadata {
    pub ruleset: Ruleset,
    pub score: u64,
    pub best_score: u64,
    pub over: bool,
    pub won: bool,
    pub terminated: bool,
    /// Present only for the heavy ruleset
    pub heavy_countdown: Option<u32>,
}

pub trait Actuator {
    /// Draw `grid`. `hints` is set right after a move and absent on setup or redraw.
    fn actuate(&mut self, grid: &Grid, metadata: &ActuatorMetadata, hints: Option<&MotionHints>);

    /// Dismiss any win or game-over message
    fn continue_game(&mut self);
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn actuate(&mut self, grid: &Grid, metadata: &ActuatorMetadata, hints: Option<&MotionHints>) {
        (**self).actuate(grid, metadata, hints);
    }

    fn continue_game(&mut self) {
        (**self).continue_game();
    }
}
