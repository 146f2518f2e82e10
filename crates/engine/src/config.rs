//! Runtime configuration read from environment variables.
use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tui_tiles_types::Ruleset;

const APP_NAME: &str = "tui-tiles";

/// Configuration for one run of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub ruleset: Ruleset,
    pub seed: u64,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Pause between a home-screen navigation and loading the chosen ruleset
    pub nav_delay: Duration,
}

impl Config {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TILES_RULESET` - `classic`, `log`, `sqrt`, `heavy` or `home` (default: classic)
    /// - `TILES_SEED` - RNG seed (default: derived from the clock)
    /// - `TILES_DATA_DIR` - saved games and best scores (default: platform data dir)
    /// - `TILES_LOG_DIR` - log files (default: `<data dir>/logs`)
    /// - `TILES_NAV_DELAY_MS` - navigation delay in milliseconds (default: 500)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ruleset = match lookup("TILES_RULESET") {
            Some(raw) => Ruleset::from_str(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown TILES_RULESET, using classic");
                Ruleset::default()
            }),
            None => Ruleset::default(),
        };

        let seed = parse(&lookup, "TILES_SEED").unwrap_or_else(clock_seed);

        let data_dir = lookup("TILES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let log_dir = lookup("TILES_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));

        let nav_delay = Duration::from_millis(parse(&lookup, "TILES_NAV_DELAY_MS").unwrap_or(500));

        Self {
            ruleset,
            seed,
            data_dir,
            log_dir,
            nav_delay,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "ignoring unparseable variable");
    }
    parsed
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format!("./.{APP_NAME}")))
}
