//! GameView: maps a committed grid plus its metadata into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::merge::log2_round;
use crate::core::{Grid, MotionHints, Tile};
use crate::engine::ActuatorMetadata;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, TileKind, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// End-of-game banner drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Won,
    Over,
}

impl Message {
    /// The banner a terminated game calls for, if any
    pub fn from_metadata(metadata: &ActuatorMetadata) -> Option<Self> {
        if !metadata.terminated {
            None
        } else if metadata.over {
            Some(Message::Over)
        } else if metadata.won {
            Some(Message::Won)
        } else {
            None
        }
    }

    fn lines(self) -> [&'static str; 2] {
        match self {
            Message::Won => ["You win!", "c: keep playing"],
            Message::Over => ["Game over!", "r: try again"],
        }
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Copy)]
pub struct BoardFrame<'a> {
    pub grid: &'a Grid,
    pub metadata: &'a ActuatorMetadata,
    pub hints: Option<&'a MotionHints>,
    /// Score difference since the previous frame
    pub score_change: i64,
    pub message: Option<Message>,
}

const SCREEN: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// A lightweight terminal renderer for the tile board.
pub struct GameView {
    /// Board cell pitch in terminal columns (tile width + 1 gap).
    cell_w: u16,
    /// Board cell pitch in terminal rows (tile height + 1 gap).
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 8x4 gives a 7x3 tile, roughly square in most terminal fonts.
        Self { cell_w: 8, cell_h: 4 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(2),
        }
    }

    fn board_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        (n * self.cell_w + 1, n * self.cell_h + 1)
    }

    /// Render a frame into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: &BoardFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(LIGHT_TEXT, SCREEN).cell(' '));

        let (board_w, board_h) = self.board_size();
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(DARK_TEXT, BOARD_BG),
        );

        for pos in Grid::positions() {
            let tile = frame.grid.cell_content(pos).ok().flatten();
            let merged = frame
                .hints
                .is_some_and(|hints| hints.merged_from(pos).is_some());
            self.draw_cell(fb, start_x + 1, start_y + 1, pos, tile, merged);
        }

        self.draw_side_panel(fb, frame, viewport, start_x + frame_w + 2, start_y);

        if let Some(message) = frame.message {
            let [title, hint] = message.lines();
            let mid = start_y + frame_h / 2;
            let banner = CellStyle::new(LIGHT_TEXT, Rgb::new(60, 58, 50)).bold();
            fb.fill_rect(start_x + 1, mid.saturating_sub(1), board_w, 3, ' ', banner);
            fb.put_str_centered(start_x + 1, mid.saturating_sub(1), board_w, title, banner);
            fb.put_str_centered(start_x + 1, mid, board_w, hint, CellStyle { bold: false, ..banner });
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &BoardFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        board_x: u16,
        board_y: u16,
        pos: Position,
        tile: Option<&Tile>,
        merged: bool,
    ) {
        let x = board_x + 1 + pos.x as u16 * self.cell_w;
        let y = board_y + 1 + pos.y as u16 * self.cell_h;
        let w = self.cell_w - 1;
        let h = self.cell_h - 1;

        let Some(tile) = tile else {
            fb.fill_rect(x, y, w, h, ' ', CellStyle::new(DARK_TEXT, EMPTY_BG));
            return;
        };

        let mut style = tile_style(tile);
        if merged {
            style = style.bold();
        }
        fb.fill_rect(x, y, w, h, ' ', style);
        fb.put_str_centered(x, y + (h - 1) / 2, w, &tile_label(tile), style);
        if tile.heavy {
            fb.put_char(x + w - 1, y + h - 1, '■', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, frame: &BoardFrame<'_>, viewport: Viewport, x: u16, y: u16) {
        if x >= viewport.width || viewport.width - x < 14 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN);
        let dim = value.dim();
        let meta = frame.metadata;

        let mut y = y;
        fb.put_str(x, y, &meta.ruleset.as_str().to_uppercase(), label);
        y += 2;

        fb.put_str(x, y, "SCORE", label);
        y += 1;
        let end = fb.put_str(x, y, &meta.score.to_string(), value);
        if frame.score_change != 0 {
            let sign = if frame.score_change > 0 { '+' } else { '−' };
            let change = format!(" {sign}{}", frame.score_change.unsigned_abs());
            fb.put_str(end, y, &change, dim);
        }
        y += 2;

        fb.put_str(x, y, "BEST", label);
        y += 1;
        fb.put_str(x, y, &meta.best_score.to_string(), value);
        y += 2;

        if let Some(countdown) = meta.heavy_countdown {
            fb.put_str(x, y, "HEAVY IN", label);
            y += 1;
            fb.put_str(x, y, &countdown.to_string(), value);
            y += 2;
        }

        for help in ["arrows/wasd/hjkl", "r  restart", "c  keep playing", "q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, help, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '╭', style);
    fb.put_char(x + w - 1, y, '╮', style);
    fb.put_char(x, y + h - 1, '╰', style);
    fb.put_char(x + w - 1, y + h - 1, '╯', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Text shown inside a tile
pub fn tile_label(tile: &Tile) -> String {
    match tile.kind {
        TileKind::Number => compact_value(tile.value),
        TileKind::Multiply => format!("×{}", compact_value(tile.value)),
        TileKind::Root if tile.value == 2 => "√".to_string(),
        TileKind::Root => format!("{}√", superscript(&compact_value(tile.value))),
        TileKind::Log => "log".to_string(),
        TileKind::Cursor => "◆".to_string(),
    }
}

/// Values above five digits are shown as a power of two
fn compact_value(value: u64) -> String {
    if value <= 99_999 {
        value.to_string()
    } else {
        format!("2{}", superscript(&log2_round(value).to_string()))
    }
}

fn superscript(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}

fn tile_style(tile: &Tile) -> CellStyle {
    let style = match tile.kind {
        TileKind::Number => number_style(tile.value),
        TileKind::Multiply => CellStyle::new(LIGHT_TEXT, Rgb::new(142, 108, 190)),
        TileKind::Root => CellStyle::new(LIGHT_TEXT, Rgb::new(64, 160, 150)),
        TileKind::Log => CellStyle::new(LIGHT_TEXT, Rgb::new(82, 124, 196)),
        TileKind::Cursor => CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(230, 80, 110)).bold(),
    };
    if tile.heavy {
        style.bold()
    } else {
        style
    }
}

fn number_style(value: u64) -> CellStyle {
    let bg = match value {
        0..=2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    CellStyle::new(fg, bg)
}
