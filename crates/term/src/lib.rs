//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It avoids widget toolkits and
//! renders into a plain framebuffer that is then flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure grid + metadata -> framebuffer mapping
//! - [`renderer`]: diffing terminal writer
//! - [`actuator`]: the session-facing [`Actuator`](crate::engine::Actuator) built on the above

pub mod actuator;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_tiles_core as core;
pub use tui_tiles_engine as engine;
pub use tui_tiles_types as types;

pub use actuator::TerminalActuator;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_label, BoardFrame, GameView, Message, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
