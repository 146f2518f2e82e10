//! Session engine - wires a game to its collaborators
//!
//! The core crate knows nothing about where games are saved, how they are
//! drawn or who is watching. This crate defines those collaborator contracts
//! ([`Storage`], [`Actuator`], [`Telemetry`]), ships the stock
//! implementations, and drives a game through them with [`Session`].
//!
//! ```
//! use tui_tiles_core::seeded;
//! use tui_tiles_engine::{Actuator, ActuatorMetadata, MemoryStorage, NoTelemetry, Session, Storage};
//! use tui_tiles_types::{Direction, Ruleset};
//!
//! struct Headless;
//! impl Actuator for Headless {
//!     fn actuate(&mut self, _: &tui_tiles_core::Grid, _: &ActuatorMetadata, _: Option<&tui_tiles_core::MotionHints>) {}
//!     fn continue_game(&mut self) {}
//! }
//!
//! let mut session = Session::new(Ruleset::Classic, seeded(7), MemoryStorage::new(), Headless, NoTelemetry);
//! session.move_in(Direction::Left).unwrap();
//! assert!(session.storage().game_state().unwrap().is_some());
//! ```

pub mod actuator;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod telemetry;

pub use actuator::{Actuator, ActuatorMetadata};
pub use config::Config;
pub use error::StorageError;
pub use session::Session;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use telemetry::{JsonLinesTelemetry, NoTelemetry, Telemetry, TelemetryRecord, TracingTelemetry};
