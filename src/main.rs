//! Terminal sliding-tile runner (default binary).
//!
//! Reads configuration from the environment, logs to a file (the terminal
//! belongs to the game), and drives one [`Session`] per ruleset. A cursor
//! merge on the home board switches to the ruleset it selected.

use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use rand::Rng;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tui_tiles::core::{seeded, GameRng};
use tui_tiles::engine::{Config, JsonFileStorage, Session, TracingTelemetry};
use tui_tiles::input::{handle_event, should_quit};
use tui_tiles::term::{TerminalActuator, TerminalRenderer, Viewport};
use tui_tiles::types::Ruleset;

type TerminalSession<'a> = Session<JsonFileStorage, &'a mut TerminalActuator, TracingTelemetry>;

fn main() -> Result<()> {
    let config = Config::from_env();
    let _guard = init_logging(&config.log_dir)?;
    tracing::info!(
        ruleset = config.ruleset.as_str(),
        seed = config.seed,
        data_dir = %config.data_dir.display(),
        "starting"
    );

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut actuator = TerminalActuator::new(TerminalRenderer::stdout(), Viewport::new(w, h));
    actuator.enter()?;

    let result = run(&config, &mut actuator);

    // Always try to restore terminal state.
    let _ = actuator.exit();
    if let Err(err) = &result {
        tracing::error!(%err, "exiting with error");
    }
    result
}

fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "tui-tiles.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // File only: stderr would scribble over the board.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_session<'a>(
    config: &Config,
    ruleset: Ruleset,
    seeds: &mut GameRng,
    actuator: &'a mut TerminalActuator,
    telemetry: TracingTelemetry,
) -> Result<TerminalSession<'a>> {
    let storage = JsonFileStorage::new(&config.data_dir, ruleset).with_context(|| {
        format!("failed to open data directory {}", config.data_dir.display())
    })?;
    tracing::info!(ruleset = ruleset.as_str(), "opening session");
    Ok(Session::new(ruleset, seeded(seeds.gen()), storage, actuator, telemetry))
}

fn run(config: &Config, actuator: &mut TerminalActuator) -> Result<()> {
    // Every session draws its own seed from here, so one seed replays a whole run.
    let mut seeds = seeded(config.seed);
    let mut session = open_session(config, config.ruleset, &mut seeds, actuator, TracingTelemetry)?;

    loop {
        let event = event::read()?;
        match &event {
            Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(*key) => {
                return Ok(());
            }
            Event::Resize(w, h) => {
                session.actuator_mut().resize(Viewport::new(*w, *h));
                continue;
            }
            _ => {}
        }

        let Some(action) = handle_event(&event) else {
            continue;
        };
        if let Some(target) = session.handle(action)? {
            thread::sleep(config.nav_delay);
            let (_storage, actuator, telemetry) = session.into_parts();
            session = open_session(config, target, &mut seeds, actuator, telemetry)?;
        }
    }
}
