//! TerminalActuator: the renderer collaborator for terminal play.
//!
//! Keeps the last committed grid so the board can be redrawn on resize or
//! when a win/game-over banner is dismissed. Draw failures are logged and
//! never reach the session.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::{Grid, MotionHints};
use crate::engine::{Actuator, ActuatorMetadata};
use crate::fb::FrameBuffer;
use crate::game_view::{BoardFrame, GameView, Message, Viewport};
use crate::renderer::TerminalRenderer;

pub struct TerminalActuator<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
    last: Option<(Grid, ActuatorMetadata)>,
    message: Option<Message>,
    shown_score: Option<u64>,
}

impl<W: Write> TerminalActuator<W> {
    pub fn new(renderer: TerminalRenderer<W>, viewport: Viewport) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            last: None,
            message: None,
            shown_score: None,
        }
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    /// Banner currently on screen
    pub fn message(&self) -> Option<Message> {
        self.message
    }

    /// Adopt a new terminal size and redraw from scratch
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.renderer.invalidate();
        self.redraw(None, 0);
    }

    fn redraw(&mut self, hints: Option<&MotionHints>, score_change: i64) {
        let Some((grid, metadata)) = self.last.as_ref() else {
            return;
        };
        let frame = BoardFrame {
            grid,
            metadata,
            hints,
            score_change,
            message: self.message,
        };
        self.view.render_into(&frame, self.viewport, &mut self.fb);
        if let Err(err) = self.renderer.draw(&self.fb) {
            tracing::warn!(%err, "terminal draw failed");
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }
}

impl<W: Write> Actuator for TerminalActuator<W> {
    fn actuate(&mut self, grid: &Grid, metadata: &ActuatorMetadata, hints: Option<&MotionHints>) {
        let score_change = match self.shown_score {
            Some(prev) => score_change(prev, metadata.score),
            None => 0,
        };
        self.shown_score = Some(metadata.score);
        if let Some(message) = Message::from_metadata(metadata) {
            self.message = Some(message);
        }
        self.last = Some((grid.clone(), *metadata));
        self.redraw(hints, score_change);
    }

    fn continue_game(&mut self) {
        if self.message.take().is_some() {
            self.redraw(None, 0);
        }
    }
}

/// Signed difference between two scores, saturating at the i64 range
fn score_change(prev: u64, next: u64) -> i64 {
    let change = i128::from(next) - i128::from(prev);
    i64::try_from(change).unwrap_or(if change < 0 { i64::MIN } else { i64::MAX })
}
